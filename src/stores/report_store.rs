use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::errors::InternalError;
use crate::types::db::{beneficiary, request};
use crate::types::internal::report::{GroupCount, ReportData, RequestWithBeneficiary};
use crate::types::internal::{Priority, ReportFilter, RequestStatus};

#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    status: RequestStatus,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct PriorityCountRow {
    priority: Priority,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct DisabilityCountRow {
    disability_type: String,
    count: i64,
}

/// Count + group-by aggregations behind the dashboard and reports
pub struct ReportStore {
    db: DatabaseConnection,
}

impl ReportStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn count_beneficiaries(&self) -> Result<u64, InternalError> {
        beneficiary::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_beneficiaries", e))
    }

    pub async fn count_requests(&self, filter: &ReportFilter) -> Result<u64, InternalError> {
        request::Entity::find()
            .filter(filter.condition())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_requests", e))
    }

    /// Request counts per status, every status present in declaration order
    pub async fn count_by_status(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<GroupCount<RequestStatus>>, InternalError> {
        let rows = request::Entity::find()
            .select_only()
            .column(request::Column::Status)
            .column_as(Expr::col(request::Column::Id).count(), "count")
            .filter(filter.condition())
            .group_by(request::Column::Status)
            .into_model::<StatusCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("count_requests_by_status", e))?;

        Ok(fill_groups(
            &RequestStatus::ALL,
            rows.into_iter().map(|row| (row.status, row.count)),
        ))
    }

    /// Request counts per priority, every priority present in declaration order
    pub async fn count_by_priority(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<GroupCount<Priority>>, InternalError> {
        let rows = request::Entity::find()
            .select_only()
            .column(request::Column::Priority)
            .column_as(Expr::col(request::Column::Id).count(), "count")
            .filter(filter.condition())
            .group_by(request::Column::Priority)
            .into_model::<PriorityCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("count_requests_by_priority", e))?;

        Ok(fill_groups(
            &Priority::ALL,
            rows.into_iter().map(|row| (row.priority, row.count)),
        ))
    }

    /// Most recent requests matching the filter, joined with beneficiary names
    pub async fn recent_requests(
        &self,
        filter: &ReportFilter,
        limit: u64,
    ) -> Result<Vec<RequestWithBeneficiary>, InternalError> {
        let rows = request::Entity::find()
            .filter(filter.condition())
            .find_also_related(beneficiary::Entity)
            .order_by_desc(request::Column::CreatedAt)
            .order_by_desc(request::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("recent_requests", e))?;

        Ok(rows
            .into_iter()
            .map(|(request, beneficiary)| RequestWithBeneficiary { request, beneficiary })
            .collect())
    }

    /// Beneficiaries per recorded disability type, largest group first
    ///
    /// Beneficiaries without a disability type are left out.
    pub async fn beneficiaries_by_disability(&self) -> Result<Vec<GroupCount<String>>, InternalError> {
        let rows = beneficiary::Entity::find()
            .select_only()
            .column(beneficiary::Column::DisabilityType)
            .column_as(Expr::col(beneficiary::Column::Id).count(), "count")
            .filter(beneficiary::Column::DisabilityType.is_not_null())
            .filter(beneficiary::Column::DisabilityType.ne(""))
            .group_by(beneficiary::Column::DisabilityType)
            .into_model::<DisabilityCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("beneficiaries_by_disability", e))?;

        let mut groups: Vec<GroupCount<String>> = rows
            .into_iter()
            .map(|row| GroupCount {
                key: row.disability_type,
                count: row.count.max(0) as u64,
            })
            .collect();
        groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        Ok(groups)
    }

    /// Run every aggregation for one filter
    pub async fn report(&self, filter: &ReportFilter, recent_limit: u64) -> Result<ReportData, InternalError> {
        Ok(ReportData {
            total_beneficiaries: self.count_beneficiaries().await?,
            total_requests: self.count_requests(filter).await?,
            by_status: self.count_by_status(filter).await?,
            by_priority: self.count_by_priority(filter).await?,
            recent_requests: self.recent_requests(filter, recent_limit).await?,
            beneficiaries_by_disability: self.beneficiaries_by_disability().await?,
        })
    }
}

/// Expand sparse group-by rows to one entry per key, zero where absent
fn fill_groups<K: Copy + PartialEq>(
    keys: &[K],
    rows: impl IntoIterator<Item = (K, i64)>,
) -> Vec<GroupCount<K>> {
    let rows: Vec<(K, i64)> = rows.into_iter().collect();
    keys.iter()
        .map(|key| GroupCount {
            key: *key,
            count: rows
                .iter()
                .find(|(row_key, _)| row_key == key)
                .map(|(_, count)| (*count).max(0) as u64)
                .unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveModelTrait, Set};

    use crate::stores::{BeneficiaryStore, RequestStore};
    use crate::test::utils::setup_test_db;
    use crate::types::internal::{BeneficiaryForm, RequestForm};

    #[test]
    fn test_fill_groups_adds_missing_keys_in_order() {
        let groups = fill_groups(
            &RequestStatus::ALL,
            vec![(RequestStatus::Delivered, 2), (RequestStatus::Pending, 1)],
        );

        assert_eq!(
            groups,
            vec![
                GroupCount { key: RequestStatus::Pending, count: 1 },
                GroupCount { key: RequestStatus::Approved, count: 0 },
                GroupCount { key: RequestStatus::Rejected, count: 0 },
                GroupCount { key: RequestStatus::Delivered, count: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn test_recent_requests_break_created_at_ties_by_id() {
        let db = setup_test_db().await;
        let beneficiary = BeneficiaryStore::new(db.clone())
            .create(BeneficiaryForm::parse("Ana García", None, None, None).unwrap())
            .await
            .unwrap();

        for id in ["solicitud-a", "solicitud-c", "solicitud-b"] {
            request::ActiveModel {
                id: Set(id.to_string()),
                beneficiary_id: Set(beneficiary.id.clone()),
                description: Set("Silla de ruedas".to_string()),
                status: Set(RequestStatus::Pending),
                priority: Set(Priority::Medium),
                created_at: Set(1_700_000_000_000),
                updated_at: Set(1_700_000_000_000),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let store = ReportStore::new(db.clone());
        let recent = store.recent_requests(&ReportFilter::default(), 2).await.unwrap();
        let ids: Vec<&str> = recent.iter().map(|row| row.request.id.as_str()).collect();
        assert_eq!(ids, vec!["solicitud-c", "solicitud-b"]);

        let listed = RequestStore::new(db).list().await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|row| row.request.id.as_str()).collect();
        assert_eq!(ids, vec!["solicitud-c", "solicitud-b", "solicitud-a"]);
    }

    #[tokio::test]
    async fn test_empty_database_report() {
        let store = ReportStore::new(setup_test_db().await);
        let report = store.report(&ReportFilter::default(), 10).await.unwrap();

        assert_eq!(report.total_beneficiaries, 0);
        assert_eq!(report.total_requests, 0);
        assert_eq!(report.by_status.len(), 4);
        assert!(report.by_status.iter().all(|group| group.count == 0));
        assert_eq!(report.approval_rate(), 0);
        assert!(report.recent_requests.is_empty());
    }

    #[tokio::test]
    async fn test_grouping_and_filters() {
        let db = setup_test_db().await;
        let beneficiaries = BeneficiaryStore::new(db.clone());
        let requests = RequestStore::new(db.clone());
        let store = ReportStore::new(db);

        let ana = beneficiaries
            .create(BeneficiaryForm::parse("Ana García", None, Some("Motora"), None).unwrap())
            .await
            .unwrap();
        beneficiaries
            .create(BeneficiaryForm::parse("José Rivas", None, Some("Visual"), None).unwrap())
            .await
            .unwrap();
        beneficiaries
            .create(BeneficiaryForm::parse("Rosa Díaz", None, Some("Motora"), None).unwrap())
            .await
            .unwrap();
        beneficiaries
            .create(BeneficiaryForm::parse("Luis Mora", None, Some("ninguno"), None).unwrap())
            .await
            .unwrap();

        for priority in [Priority::High, Priority::High, Priority::Low] {
            requests
                .create(RequestForm::parse(&ana.id, "Medicinas", Some(priority)).unwrap())
                .await
                .unwrap();
        }
        let approved = requests
            .create(RequestForm::parse(&ana.id, "Silla de ruedas", Some(Priority::Urgent)).unwrap())
            .await
            .unwrap();
        requests.update_status(&approved.id, RequestStatus::Approved).await.unwrap();

        let all = store.report(&ReportFilter::default(), 2).await.unwrap();
        assert_eq!(all.total_beneficiaries, 4);
        assert_eq!(all.total_requests, 4);
        assert_eq!(all.status_count(RequestStatus::Pending), 3);
        assert_eq!(all.status_count(RequestStatus::Approved), 1);
        assert_eq!(all.approval_rate(), 25);
        assert_eq!(all.recent_requests.len(), 2);
        assert_eq!(
            all.beneficiaries_by_disability,
            vec![
                GroupCount { key: "Motora".to_string(), count: 2 },
                GroupCount { key: "Visual".to_string(), count: 1 },
            ]
        );

        let high_pending = store
            .report(&ReportFilter::new(Some(RequestStatus::Pending), Some(Priority::High)), 10)
            .await
            .unwrap();
        assert_eq!(high_pending.total_requests, 2);
        assert_eq!(high_pending.by_status.iter().map(|g| g.count).sum::<u64>(), 2);
        assert_eq!(high_pending.by_priority.iter().map(|g| g.count).sum::<u64>(), 2);
        assert_eq!(high_pending.total_beneficiaries, 4);
        assert!(
            high_pending
                .recent_requests
                .iter()
                .all(|item| item.beneficiary_name() == Some("Ana García"))
        );
    }
}
