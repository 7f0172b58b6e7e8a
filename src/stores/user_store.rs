use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, NotFoundError};
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::internal::timestamp::{next_update, now_millis};

/// Administrator accounts
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<user::Model, InternalError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_id", e))?
            .ok_or_else(|| NotFoundError::user(user_id))
    }

    /// Insert a user with an already-hashed password
    ///
    /// # Errors
    /// `CredentialError::DuplicateUsername` if the username is taken
    pub async fn create_user(&self, username: &str, password_hash: String) -> Result<user::Model, InternalError> {
        if self.find_by_username(username).await?.is_some() {
            return Err(CredentialError::DuplicateUsername(username.to_string()).into());
        }

        let now = now_millis();
        let new_user = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique index still guards against a concurrent sign-up
        let user = new_user.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                InternalError::from(CredentialError::DuplicateUsername(username.to_string()))
            }
            _ => InternalError::database("create_user", e),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Replace the stored password hash
    pub async fn update_password_hash(
        &self,
        user_id: &str,
        password_hash: String,
    ) -> Result<user::Model, InternalError> {
        let user = self.get_user_by_id(user_id).await?;
        let updated_at = next_update(user.updated_at);

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(updated_at);

        let user = active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_password_hash", e))?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let store = UserStore::new(setup_test_db().await);

        let created = store.create_user("vocero", "$argon2id$hash".to_string()).await.unwrap();
        let found = store.find_by_username("vocero").await.unwrap().unwrap();

        assert_eq!(created, found);
        assert_eq!(created.created_at, created.updated_at);
        assert!(store.find_by_username("otro").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = UserStore::new(setup_test_db().await);
        store.create_user("vocero", "hash-1".to_string()).await.unwrap();

        let result = store.create_user("vocero", "hash-2".to_string()).await;
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateUsername(ref name))) if name == "vocero"
        ));
    }

    #[tokio::test]
    async fn test_update_password_hash_advances_updated_at() {
        let store = UserStore::new(setup_test_db().await);
        let user = store.create_user("vocero", "old-hash".to_string()).await.unwrap();

        let updated = store.update_password_hash(&user.id, "new-hash".to_string()).await.unwrap();

        assert_eq!(updated.password_hash, "new-hash");
        assert!(updated.updated_at > user.updated_at);
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let store = UserStore::new(setup_test_db().await);
        let result = store.get_user_by_id("missing").await;
        assert!(matches!(result, Err(InternalError::NotFound(NotFoundError::User { .. }))));
    }
}
