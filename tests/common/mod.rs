// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use community_aid_backend::AppData;
use community_aid_backend::config::{BootstrapSettings, EnvironmentProvider, SecretManager, migrate_database};
use community_aid_backend::types::internal::Session;
use community_aid_backend::types::internal::context::RequestContext;
use sea_orm::Database;

/// Environment backed by a map instead of the process environment
#[derive(Default)]
pub struct TestEnvironment {
    vars: HashMap<String, String>,
}

impl TestEnvironment {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProvider for TestEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// AppData over a fresh in-memory database with migrations applied
pub async fn setup_app_data() -> Arc<AppData> {
    setup_app_data_with(TestEnvironment::default()).await
}

pub async fn setup_app_data_with(env: TestEnvironment) -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    migrate_database(&db).await.expect("Failed to run migrations");

    let settings = BootstrapSettings::from_env_provider(&env).expect("Test settings should be valid");
    let secrets = SecretManager::new("integration-jwt-secret-at-least-32-chars", "integration-pepper")
        .expect("Test secrets should be valid");

    Arc::new(AppData::with_secrets(settings, db, Arc::new(secrets)))
}

/// Context for a signed-in administrator
pub fn signed_in_context() -> RequestContext {
    RequestContext::for_cli("integration-test").with_session(Session {
        user_id: "admin-1".to_string(),
        username: "vocero".to_string(),
        expires_at: i64::MAX,
    })
}
