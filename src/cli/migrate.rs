use crate::config::{BootstrapSettings, connect_database, migrate_database};

/// Connect to the configured database and apply pending migrations
///
/// Does not initialize `AppData`, so no secrets are required.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = connect_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");
    println!("✓ Database migrated: {}", settings.database_url());

    Ok(())
}
