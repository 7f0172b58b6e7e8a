// CLI module for operations that run without the HTTP server

pub mod create_user;
pub mod migrate;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Community aid backend
#[derive(Parser)]
#[command(name = "community-aid-backend")]
#[command(about = "Beneficiary registry and aid request tracking backend", long_about = None)]
pub struct Cli {
    /// Command to run; starts the server when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create an administrator account
    CreateUser {
        /// Login name for the new account
        username: String,

        /// Password to use; a random one is generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

impl Cli {
    /// Whether the parsed command should start the server
    pub fn is_serve(&self) -> bool {
        matches!(self.command, None | Some(Commands::Serve))
    }
}

/// Execute a non-server CLI command
///
/// `Migrate` runs before `AppData` exists and is handled by
/// [`migrate::run_migrations`]; everything else needs the full state.
pub async fn execute_command(
    command: Commands,
    app_data: Arc<AppData>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::CreateUser { username, password } => {
            create_user::create_user(app_data, &username, password).await?;
        }
        Commands::Serve | Commands::Migrate => {
            tracing::debug!("Command handled before AppData initialization");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::parse_from(["community-aid-backend"]);
        assert!(cli.is_serve());
    }

    #[test]
    fn test_create_user_arguments() {
        let cli = Cli::parse_from([
            "community-aid-backend",
            "create-user",
            "vocero",
            "--password",
            "secreto123",
        ]);

        assert!(!cli.is_serve());
        match cli.command {
            Some(Commands::CreateUser { username, password }) => {
                assert_eq!(username, "vocero");
                assert_eq!(password.as_deref(), Some("secreto123"));
            }
            _ => panic!("expected create-user"),
        }
    }
}
