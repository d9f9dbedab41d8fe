//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup and read-only afterwards; the
//! token keys in particular are never mutated, so concurrent requests share
//! them without locking.

use crate::auth::{PasswordService, TokenError, TokenService};
use crate::config::AppConfig;
use crate::repositories::UserStore;
use std::sync::Arc;

/// Shared application state
///
/// All fields are cheap to clone (`Arc`s or `Copy` values).
#[derive(Clone)]
pub struct AppState {
    /// User persistence
    pub users: Arc<dyn UserStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token service with pre-computed keys
    pub tokens: TokenService,
    /// Password hashing settings
    pub passwords: PasswordService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the signing keys from the configured secret; call once at
    /// startup. Fails when the configured token lifetime is out of range.
    pub fn new(users: Arc<dyn UserStore>, config: AppConfig) -> Result<Self, TokenError> {
        let tokens = TokenService::new(&config.jwt.secret, config.jwt.token_expiry_secs)?;
        let passwords = PasswordService::new(config.password.scheme, config.password.bcrypt_cost);

        Ok(Self {
            users,
            config: Arc::new(config),
            tokens,
            passwords,
        })
    }

    #[inline]
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    #[inline]
    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }
}
