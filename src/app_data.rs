use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::cache::PageCache;
use crate::config::{BootstrapSettings, SecretManager};
use crate::errors::InternalError;
use crate::providers::{CryptoProvider, TokenProvider};
use crate::stores::{BeneficiaryStore, ReportStore, RequestStore, UserStore};

/// Shared application state, built once at startup
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ settings / secret_manager
///   ├─ page_cache
///   ├─ stores (user, beneficiary, request, report)
///   └─ token_provider, crypto_provider
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ AuthCoordinator::new(app_data)
///   ├─ BeneficiaryCoordinator::new(app_data)
///   ├─ RequestCoordinator::new(app_data)
///   └─ ReportCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: BootstrapSettings,
    pub secret_manager: Arc<SecretManager>,
    pub page_cache: Arc<PageCache>,
    pub user_store: Arc<UserStore>,
    pub beneficiary_store: Arc<BeneficiaryStore>,
    pub request_store: Arc<RequestStore>,
    pub report_store: Arc<ReportStore>,
    pub token_provider: Arc<TokenProvider>,
    pub crypto_provider: Arc<CryptoProvider>,
}

impl AppData {
    /// Initialize application data, loading secrets from the environment
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when secret manager initialization fails
    pub fn init(settings: BootstrapSettings, db: DatabaseConnection) -> Result<Self, InternalError> {
        tracing::debug!("Initializing secret manager...");
        let secret_manager = SecretManager::init()
            .map_err(|e| InternalError::parse("secret_manager", e.to_string()))?;

        Ok(Self::with_secrets(settings, db, Arc::new(secret_manager)))
    }

    pub fn with_secrets(
        settings: BootstrapSettings,
        db: DatabaseConnection,
        secret_manager: Arc<SecretManager>,
    ) -> Self {
        tracing::debug!("Creating stores...");
        let user_store = Arc::new(UserStore::new(db.clone()));
        let beneficiary_store = Arc::new(BeneficiaryStore::new(db.clone()));
        let request_store = Arc::new(RequestStore::new(db.clone()));
        let report_store = Arc::new(ReportStore::new(db.clone()));

        let token_provider = Arc::new(TokenProvider::new(
            secret_manager.clone(),
            settings.session_ttl_minutes(),
        ));
        let crypto_provider = Arc::new(CryptoProvider::new(secret_manager.clone()));

        tracing::info!("AppData initialization complete");

        Self {
            db,
            settings,
            secret_manager,
            page_cache: Arc::new(PageCache::default()),
            user_store,
            beneficiary_store,
            request_store,
            report_store,
            token_provider,
            crypto_provider,
        }
    }
}
