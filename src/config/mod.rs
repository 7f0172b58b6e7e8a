// Configuration layer - environment-driven settings, secrets, logging and database setup

pub mod bootstrap_settings;
pub mod database;
pub mod env_provider;
pub mod errors;
pub mod logging;
pub mod secret_manager;

pub use bootstrap_settings::BootstrapSettings;
pub use database::{connect_database, migrate_database};
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::ConfigError;
pub use logging::init_logging;
pub use secret_manager::{SecretError, SecretManager};

#[cfg(test)]
pub use env_provider::MockEnvironment;
