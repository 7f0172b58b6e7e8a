use std::sync::Arc;

use clap::Parser;
use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;

use community_aid_backend::AppData;
use community_aid_backend::api::{AuthApi, BeneficiariesApi, HealthApi, ReportsApi, RequestsApi};
use community_aid_backend::cli::{self, Cli, Commands};
use community_aid_backend::config::{BootstrapSettings, connect_database, init_logging, migrate_database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let args = Cli::parse();
    let settings = BootstrapSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    if let Some(Commands::Migrate) = args.command {
        return cli::migrate::run_migrations(&settings).await;
    }

    let db = connect_database(&settings).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(settings, db)?);

    if args.is_serve() {
        return serve(app_data).await;
    }

    match args.command {
        Some(command) => cli::execute_command(command, app_data).await,
        None => Ok(()),
    }
}

async fn serve(app_data: Arc<AppData>) -> Result<(), Box<dyn std::error::Error>> {
    let address = app_data.settings.server_address();
    let port = app_data.settings.server_port();

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            BeneficiariesApi::new(app_data.clone()),
            RequestsApi::new(app_data.clone()),
            ReportsApi::new(app_data.clone()),
        ),
        "Community Aid API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://localhost:{}/api", port));

    let ui = api_service.swagger_ui();

    // API under /api, Swagger UI under /swagger
    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", port);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
