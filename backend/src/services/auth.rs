//! Login flow
//!
//! Looks up the credential, verifies the password on the blocking pool and
//! issues a session token. Unknown usernames and wrong passwords are
//! indistinguishable to the caller.

use super::with_timeout;
use crate::auth::{PasswordError, PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::UserStore;
use chrono::Utc;
use tracing::{debug, info, warn};
use user_app_shared::{AuthError, LoginRequest, LoginResponse};

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Verify credentials and issue a token
    pub async fn login(
        store: &dyn UserStore,
        tokens: &TokenService,
        req: LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        let LoginRequest { username, password } = req;

        let credential = with_timeout(store.find_credential(&username))
            .await?
            .ok_or_else(|| {
                debug!(%username, "Login rejected: unknown username");
                ApiError::from(AuthError::InvalidCredentials)
            })?;

        let user_id = credential.user_id;
        let password = password.into_secret();
        let matches = match PasswordService::verify_async(password, credential.password_hash).await
        {
            Ok(matches) => matches,
            Err(PasswordError::MalformedHash(reason)) => {
                warn!(user_id, %reason, "Stored password hash is malformed");
                false
            }
            Err(e) => return Err(ApiError::Internal(e.into())),
        };

        if !matches {
            debug!(user_id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = tokens
            .issue_token(user_id, Utc::now())
            .map_err(|e| ApiError::Internal(e.into()))?;

        info!(user_id, "User logged in");

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            token,
        })
    }
}
