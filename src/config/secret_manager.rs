use std::fmt;

use thiserror::Error;

use crate::config::{EnvironmentProvider, SystemEnvironment};

const JWT_SECRET_VAR: &str = "JWT_SECRET";
const PEPPER_VAR: &str = "PASSWORD_PEPPER";
const JWT_SECRET_MIN_LENGTH: usize = 32;
const PEPPER_MIN_LENGTH: usize = 16;

/// Failures while loading secrets
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Holds the signing secret for session tokens and the password pepper
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
}

impl SecretManager {
    /// Load and validate all secrets from the process environment
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or too short
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let jwt_secret = load_secret(env, JWT_SECRET_VAR, JWT_SECRET_MIN_LENGTH)?;
        let password_pepper = load_secret(env, PEPPER_VAR, PEPPER_MIN_LENGTH)?;

        Ok(Self {
            jwt_secret,
            password_pepper,
        })
    }

    /// Build directly from values; lengths are still enforced
    pub fn new(jwt_secret: &str, password_pepper: &str) -> Result<Self, SecretError> {
        check_length(JWT_SECRET_VAR, jwt_secret, JWT_SECRET_MIN_LENGTH)?;
        check_length(PEPPER_VAR, password_pepper, PEPPER_MIN_LENGTH)?;

        Ok(Self {
            jwt_secret: jwt_secret.to_string(),
            password_pepper: password_pepper.to_string(),
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Pepper passed to Argon2 as its secret parameter
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }
}

fn load_secret(
    env: &dyn EnvironmentProvider,
    name: &str,
    min_length: usize,
) -> Result<String, SecretError> {
    let value = env.get_var(name).ok_or_else(|| SecretError::Missing {
        secret_name: name.to_string(),
    })?;
    check_length(name, &value, min_length)?;
    Ok(value)
}

fn check_length(name: &str, value: &str, min_length: usize) -> Result<(), SecretError> {
    if value.len() < min_length {
        return Err(SecretError::InvalidLength {
            secret_name: name.to_string(),
            expected: min_length,
            actual: value.len(),
        });
    }
    Ok(())
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_loads_valid_secrets() {
        let manager = SecretManager::from_env_provider(&MockEnvironment::with_test_secrets()).unwrap();

        assert_eq!(manager.jwt_secret(), "test-jwt-secret-that-is-at-least-32-chars");
        assert_eq!(manager.password_pepper(), "test-pepper-16-chars");
    }

    #[test]
    fn test_missing_jwt_secret() {
        let env = MockEnvironment::empty().with_var("PASSWORD_PEPPER", "test-pepper-16-chars");
        let err = SecretManager::from_env_provider(&env).unwrap_err();

        assert!(matches!(err, SecretError::Missing { ref secret_name } if secret_name == "JWT_SECRET"));
    }

    #[test]
    fn test_short_pepper_is_rejected() {
        let env = MockEnvironment::empty().with_vars(&[
            ("JWT_SECRET", "test-jwt-secret-that-is-at-least-32-chars"),
            ("PASSWORD_PEPPER", "short"),
        ]);
        let err = SecretManager::from_env_provider(&env).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Secret 'PASSWORD_PEPPER' must be at least 16 characters, got 5"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let manager = SecretManager::new(
            "test-jwt-secret-that-is-at-least-32-chars",
            "test-pepper-16-chars",
        )
        .unwrap();
        let output = format!("{:?}", manager);

        assert!(output.contains("<redacted>"));
        assert!(!output.contains("test-pepper-16-chars"));
    }
}
