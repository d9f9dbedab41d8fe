//! Password hashing with bcrypt or argon2
//!
//! New hashes are produced with the configured scheme. Verification detects
//! the scheme from the stored hash, so accounts hashed under either setting
//! keep working after the configuration changes.
//!
//! # Performance Considerations
//!
//! Both schemes are intentionally CPU-intensive. In async contexts use the
//! `*_async` variants, which run on the blocking thread pool.

use crate::config::PasswordScheme;
use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use user_app_shared::validation::MAX_PASSWORD_BYTES;

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];
const ARGON2_PREFIX: &str = "$argon2";

/// Password hashing failures
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hashing(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("password task failed: {0}")]
    Task(String),
}

/// Password hashing service
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    scheme: PasswordScheme,
    bcrypt_cost: u32,
}

impl PasswordService {
    pub fn new(scheme: PasswordScheme, bcrypt_cost: u32) -> Self {
        Self { scheme, bcrypt_cost }
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Hash a password with the configured scheme (blocking operation)
    ///
    /// bcrypt refuses input longer than `MAX_PASSWORD_BYTES` instead of
    /// truncating it.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.scheme {
            PasswordScheme::Bcrypt if password.len() > MAX_PASSWORD_BYTES => Err(
                PasswordError::Hashing(format!("password exceeds {} bytes", MAX_PASSWORD_BYTES)),
            ),
            PasswordScheme::Bcrypt => bcrypt::hash(password, self.bcrypt_cost)
                .map_err(|e| PasswordError::Hashing(e.to_string())),
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::Hashing(e.to_string()))
            }
        }
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(&self, password: SecretString) -> Result<String, PasswordError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(password.expose_secret()))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `Ok(false)` on mismatch. A hash that is not a bcrypt or argon2
    /// string, or that fails to parse, is reported as `MalformedHash`.
    ///
    /// bcrypt only reads the first 72 bytes, so a longer candidate never
    /// matches a bcrypt hash.
    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix)) {
            if password.len() > MAX_PASSWORD_BYTES {
                return Ok(false);
            }
            return bcrypt::verify(password, hash)
                .map_err(|e| PasswordError::MalformedHash(e.to_string()));
        }

        if hash.starts_with(ARGON2_PREFIX) {
            let parsed_hash =
                PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
            return match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
            };
        }

        Err(PasswordError::MalformedHash(
            "unrecognized hash format".to_string(),
        ))
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: SecretString, hash: String) -> Result<bool, PasswordError> {
        tokio::task::spawn_blocking(move || Self::verify(password.expose_secret(), &hash))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }
}
