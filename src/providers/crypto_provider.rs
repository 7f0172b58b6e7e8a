use std::fmt;
use std::sync::{Arc, OnceLock};

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;

use crate::config::SecretManager;
use crate::errors::InternalError;

const DUMMY_PASSWORD: &str = "community-aid-unknown-user";

/// Password hashing and generation
///
/// Hashes are Argon2id in PHC string form, keyed with the server pepper.
pub struct CryptoProvider {
    secret_manager: Arc<SecretManager>,
    dummy_hash: OnceLock<String>,
}

impl CryptoProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self {
            secret_manager,
            dummy_hash: OnceLock::new(),
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.secret_manager.password_pepper().as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a plaintext password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
            .to_string();

        Ok(hash)
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A mismatch is `Ok(false)`; only a malformed hash or broken parameters
    /// are errors.
    pub fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, InternalError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| InternalError::crypto("password_hash_parse", e.to_string()))?;

        match self.argon2()?.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(InternalError::crypto("password_verify", e.to_string())),
        }
    }

    /// Run one full verification against a throwaway hash
    ///
    /// Login calls this for unknown usernames so they cost the same Argon2
    /// work as a wrong password.
    pub fn verify_dummy_password(&self, password: &str) -> Result<(), InternalError> {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.hash_password(DUMMY_PASSWORD)?;
                self.dummy_hash.get_or_init(|| hash)
            }
        };

        self.verify_password(password, hash)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn has_dummy_hash(&self) -> bool {
        self.dummy_hash.get().is_some()
    }

    /// Generate a random 20-character password
    ///
    /// Used by the CLI when an administrator is created without one.
    pub fn generate_secure_password(&self) -> String {
        const PASSWORD_LENGTH: usize = 20;
        const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ\
                                 abcdefghijkmnopqrstuvwxyz\
                                 23456789\
                                 !@#$%*-_=+?";

        let mut rng = rand::rng();
        (0..PASSWORD_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }
}

impl fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoProvider")
            .field("secret_manager", &"<redacted>")
            .finish()
    }
}
