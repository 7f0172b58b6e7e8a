use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::{DatabaseError, NotFoundError};
use crate::types::db::beneficiary;
use crate::types::db::request::{self, ActiveModel, Entity as Request};
use crate::types::internal::report::RequestWithBeneficiary;
use crate::types::internal::timestamp::{next_update, now_millis};
use crate::types::internal::{RequestEditForm, RequestForm, RequestStatus};

/// Aid requests and their status lifecycle
pub struct RequestStore {
    db: DatabaseConnection,
}

impl RequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All requests with their beneficiary's name, newest first
    pub async fn list(&self) -> Result<Vec<RequestWithBeneficiary>, InternalError> {
        let rows = Request::find()
            .find_also_related(beneficiary::Entity)
            .order_by_desc(request::Column::CreatedAt)
            .order_by_desc(request::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_requests", e))?;

        Ok(rows.into_iter().map(with_beneficiary).collect())
    }

    /// Requests of one beneficiary, newest first
    pub async fn list_for_beneficiary(&self, beneficiary_id: &str) -> Result<Vec<request::Model>, InternalError> {
        Request::find()
            .filter(request::Column::BeneficiaryId.eq(beneficiary_id))
            .order_by_desc(request::Column::CreatedAt)
            .order_by_desc(request::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_requests_for_beneficiary", e))
    }

    pub async fn get(&self, id: &str) -> Result<RequestWithBeneficiary, InternalError> {
        Request::find_by_id(id)
            .find_also_related(beneficiary::Entity)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_request", e))?
            .map(with_beneficiary)
            .ok_or_else(|| NotFoundError::request(id))
    }

    async fn get_row(&self, id: &str) -> Result<request::Model, InternalError> {
        Request::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_request", e))?
            .ok_or_else(|| NotFoundError::request(id))
    }

    /// Create a request in status Pendiente
    ///
    /// # Errors
    /// `NotFoundError::Beneficiary` when the owning beneficiary does not exist
    pub async fn create(&self, form: RequestForm) -> Result<request::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        let owner = beneficiary::Entity::find_by_id(form.beneficiary_id.as_str())
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("find_beneficiary", e))?;
        if owner.is_none() {
            return Err(NotFoundError::beneficiary(&form.beneficiary_id));
        }

        let now = now_millis();
        let model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            beneficiary_id: Set(form.beneficiary_id),
            description: Set(form.description),
            status: Set(RequestStatus::Pending),
            priority: Set(form.priority),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let request = model
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("create_request", e))?;

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        tracing::info!(
            request_id = %request.id,
            beneficiary_id = %request.beneficiary_id,
            priority = %request.priority,
            "Request created"
        );
        Ok(request)
    }

    /// Apply an edit form
    ///
    /// A status different from the current one must be a legal transition.
    pub async fn update(&self, id: &str, form: RequestEditForm) -> Result<request::Model, InternalError> {
        let existing = self.get_row(id).await?;

        let status = match form.status {
            Some(next) if next != existing.status => existing.status.transition_to(next)?,
            _ => existing.status,
        };
        let previous_status = existing.status;
        let updated_at = next_update(existing.updated_at);

        let mut active: ActiveModel = existing.into();
        active.description = Set(form.description);
        active.priority = Set(form.priority);
        active.status = Set(status);
        active.updated_at = Set(updated_at);

        let request = active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_request", e))?;

        tracing::info!(request_id = %request.id, from = %previous_status, to = %request.status, "Request updated");
        Ok(request)
    }

    /// Move a request to `next`
    ///
    /// # Errors
    /// `TransitionError::NotAllowed` for moves outside the lifecycle; nothing
    /// is written in that case.
    pub async fn update_status(&self, id: &str, next: RequestStatus) -> Result<request::Model, InternalError> {
        let existing = self.get_row(id).await?;
        let previous_status = existing.status;
        let status = previous_status.transition_to(next)?;
        let updated_at = next_update(existing.updated_at);

        let mut active: ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(updated_at);

        let request = active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_request_status", e))?;

        tracing::info!(request_id = %request.id, from = %previous_status, to = %status, "Request status changed");
        Ok(request)
    }

    /// Delete a request, returning the removed row
    pub async fn delete(&self, id: &str) -> Result<request::Model, InternalError> {
        let existing = self.get_row(id).await?;

        Request::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_request", e))?;

        tracing::info!(request_id = %id, "Request deleted");
        Ok(existing)
    }
}

fn with_beneficiary((request, beneficiary): (request::Model, Option<beneficiary::Model>)) -> RequestWithBeneficiary {
    RequestWithBeneficiary {
        request,
        beneficiary,
    }
}
