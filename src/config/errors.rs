use thiserror::Error;

/// Errors raised while loading settings from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Setting '{setting_name}' has invalid value '{value}': {reason}")]
    InvalidSetting {
        setting_name: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(setting_name: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
