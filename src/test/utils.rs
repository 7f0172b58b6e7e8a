// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem_openapi::auth::Bearer;
use sea_orm::{Database, DatabaseConnection};

use crate::api::BearerAuth;
use crate::app_data::AppData;
use crate::config::{BootstrapSettings, MockEnvironment, SecretManager};
use crate::types::db::{beneficiary, request, user};
use crate::types::internal::{BeneficiaryForm, Priority, RequestForm};

/// Fresh in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    let env = MockEnvironment::with_test_secrets();
    Arc::new(SecretManager::from_env_provider(&env).expect("Failed to build test SecretManager"))
}

pub fn test_settings() -> BootstrapSettings {
    BootstrapSettings::from_env_provider(&MockEnvironment::empty())
        .expect("Default settings should be valid")
}

/// Full application state over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::with_secrets(test_settings(), db, test_secret_manager()))
}

/// Create (once) the user "vocero" and return a bearer token for it
pub async fn signed_in_bearer(app_data: &AppData) -> BearerAuth {
    let user = match app_data
        .user_store
        .find_by_username("vocero")
        .await
        .expect("Failed to look up test user")
    {
        Some(user) => user,
        None => create_test_user(app_data, "vocero", "secreto123").await,
    };

    let (token, _) = app_data
        .token_provider
        .issue_session_token(&user)
        .expect("Failed to issue test token");

    BearerAuth(Bearer { token })
}

pub async fn create_test_user(app_data: &AppData, username: &str, password: &str) -> user::Model {
    let hash = app_data
        .crypto_provider
        .hash_password(password)
        .expect("Failed to hash test password");

    app_data
        .user_store
        .create_user(username, hash)
        .await
        .expect("Failed to create test user")
}

pub async fn create_test_beneficiary(app_data: &AppData, full_name: &str) -> beneficiary::Model {
    let form = BeneficiaryForm::parse(full_name, None, Some("Motora"), None)
        .expect("Test beneficiary form should be valid");

    app_data
        .beneficiary_store
        .create(form)
        .await
        .expect("Failed to create test beneficiary")
}

pub async fn create_test_request(
    app_data: &AppData,
    beneficiary_id: &str,
    priority: Priority,
) -> request::Model {
    let form = RequestForm::parse(beneficiary_id, "Silla de ruedas", Some(priority))
        .expect("Test request form should be valid");

    app_data
        .request_store
        .create(form)
        .await
        .expect("Failed to create test request")
}
