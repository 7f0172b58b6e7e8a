use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::{DatabaseError, NotFoundError};
use crate::types::db::beneficiary::{self, ActiveModel, Entity as Beneficiary};
use crate::types::db::request;
use crate::types::internal::BeneficiaryForm;
use crate::types::internal::timestamp::{next_update, now_millis};

pub struct BeneficiaryStore {
    db: DatabaseConnection,
}

impl BeneficiaryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All beneficiaries, newest first
    pub async fn list(&self) -> Result<Vec<beneficiary::Model>, InternalError> {
        Beneficiary::find()
            .order_by_desc(beneficiary::Column::CreatedAt)
            .order_by_desc(beneficiary::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_beneficiaries", e))
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        Beneficiary::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_beneficiaries", e))
    }

    pub async fn find(&self, id: &str) -> Result<Option<beneficiary::Model>, InternalError> {
        Beneficiary::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_beneficiary", e))
    }

    pub async fn get(&self, id: &str) -> Result<beneficiary::Model, InternalError> {
        self.find(id).await?.ok_or_else(|| NotFoundError::beneficiary(id))
    }

    pub async fn create(&self, form: BeneficiaryForm) -> Result<beneficiary::Model, InternalError> {
        let now = now_millis();
        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            full_name: Set(form.full_name),
            birth_date: Set(form.birth_date),
            disability_type: Set(form.disability_type),
            notes: Set(form.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let beneficiary = model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_beneficiary", e))?;

        tracing::info!(beneficiary_id = %beneficiary.id, "Beneficiary registered");
        Ok(beneficiary)
    }

    /// Overwrite every editable field
    pub async fn update(&self, id: &str, form: BeneficiaryForm) -> Result<beneficiary::Model, InternalError> {
        let existing = self.get(id).await?;
        let updated_at = next_update(existing.updated_at);

        let mut active: ActiveModel = existing.into();
        active.full_name = Set(form.full_name);
        active.birth_date = Set(form.birth_date);
        active.disability_type = Set(form.disability_type);
        active.notes = Set(form.notes);
        active.updated_at = Set(updated_at);

        let beneficiary = active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_beneficiary", e))?;

        tracing::info!(beneficiary_id = %beneficiary.id, "Beneficiary updated");
        Ok(beneficiary)
    }

    /// Delete a beneficiary together with all of its requests
    ///
    /// Both deletes run in one transaction.
    ///
    /// # Returns
    /// * `u64` - Number of requests removed with the beneficiary
    pub async fn delete(&self, id: &str) -> Result<u64, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        let exists = Beneficiary::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("find_beneficiary", e))?
            .is_some();
        if !exists {
            return Err(NotFoundError::beneficiary(id));
        }

        let removed_requests = request::Entity::delete_many()
            .filter(request::Column::BeneficiaryId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_beneficiary_requests", e))?
            .rows_affected;

        Beneficiary::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_beneficiary", e))?;

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        tracing::info!(beneficiary_id = %id, removed_requests, "Beneficiary deleted");
        Ok(removed_requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;
    use chrono::NaiveDate;

    fn form(name: &str) -> BeneficiaryForm {
        BeneficiaryForm {
            full_name: name.to_string(),
            birth_date: None,
            disability_type: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = BeneficiaryStore::new(setup_test_db().await);

        let created = store.create(form("Ana García")).await.unwrap();
        let fetched = store.get(&created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.birth_date, None);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let store = BeneficiaryStore::new(setup_test_db().await);
        let created = store.create(form("Ana García")).await.unwrap();

        let updated = store
            .update(
                &created.id,
                BeneficiaryForm {
                    full_name: "Ana María García".to_string(),
                    birth_date: NaiveDate::from_ymd_opt(1950, 1, 2),
                    disability_type: Some("Visual".to_string()),
                    notes: Some("Vive sola".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name, "Ana María García");
        assert_eq!(updated.disability_type.as_deref(), Some("Visual"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_missing_beneficiary_is_not_found() {
        let store = BeneficiaryStore::new(setup_test_db().await);

        assert!(matches!(
            store.get("missing").await,
            Err(InternalError::NotFound(NotFoundError::Beneficiary { .. }))
        ));
        assert!(matches!(
            store.update("missing", form("X")).await,
            Err(InternalError::NotFound(_))
        ));
        assert!(matches!(store.delete("missing").await, Err(InternalError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_without_requests() {
        let store = BeneficiaryStore::new(setup_test_db().await);
        let created = store.create(form("Ana García")).await.unwrap();

        assert_eq!(store.delete(&created.id).await.unwrap(), 0);
        assert!(store.find(&created.id).await.unwrap().is_none());
    }
}
