use std::fmt;
use std::str::FromStr;

use crate::config::errors::ConfigError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://community_aid.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 720;
const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;
const DEFAULT_REPORT_RECENT_LIMIT: u64 = 10;

/// Infrastructure settings read once at startup
#[derive(Clone)]
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    session_ttl_minutes: i64,
    report_recent_limit: u64,
}

impl BootstrapSettings {
    /// Load settings from the given environment, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSetting` when a variable is present but
    /// cannot be parsed or is out of range.
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let database_url = env
            .get_non_empty("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let server_host = env
            .get_non_empty("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let server_port: u16 = parse_or_default(env, "PORT", DEFAULT_PORT)?;
        if server_port == 0 {
            return Err(ConfigError::invalid("PORT", "0", "must be between 1 and 65535"));
        }

        let session_ttl_minutes: i64 =
            parse_or_default(env, "SESSION_TTL_MINUTES", DEFAULT_SESSION_TTL_MINUTES)?;
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&session_ttl_minutes) {
            return Err(ConfigError::invalid(
                "SESSION_TTL_MINUTES",
                &session_ttl_minutes.to_string(),
                format!("must be between 1 and {MAX_SESSION_TTL_MINUTES}"),
            ));
        }

        let report_recent_limit: u64 =
            parse_or_default(env, "REPORT_RECENT_LIMIT", DEFAULT_REPORT_RECENT_LIMIT)?;
        if report_recent_limit == 0 {
            return Err(ConfigError::invalid("REPORT_RECENT_LIMIT", "0", "must be positive"));
        }

        Ok(Self {
            database_url,
            server_host,
            server_port,
            session_ttl_minutes,
            report_recent_limit,
        })
    }

    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn session_ttl_minutes(&self) -> i64 {
        self.session_ttl_minutes
    }

    /// Number of recent requests listed on reports
    pub fn report_recent_limit(&self) -> u64 {
        self.report_recent_limit
    }
}

fn parse_or_default<T>(env: &dyn EnvironmentProvider, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env.get_non_empty(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(key, &raw, e.to_string())),
        None => Ok(default),
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .field("report_recent_limit", &self.report_recent_limit)
            .finish()
    }
}
