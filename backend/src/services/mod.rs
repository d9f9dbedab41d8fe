//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth primitives.

pub mod auth;
pub mod user;

pub use auth::AuthService;
pub use user::UserService;

use crate::repositories::StoreError;
use std::future::Future;
use std::time::Duration;

/// Ceiling for any single store call made on behalf of a request
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a store call under `STORE_TIMEOUT`
pub(crate) async fn with_timeout<T, F>(call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(STORE_TIMEOUT, call)
        .await
        .map_err(|_| StoreError::Timeout(STORE_TIMEOUT))?
}
