//! Authentication middleware
//!
//! `require_auth` is the single enforcement point for the `Authorization`
//! header. It runs before protected handlers, verifies the bearer token and
//! stores the caller's identity in the request extensions, where handlers
//! pick it up through the `AuthUser` extractor.
//!
//! Every token failure is answered with the same 401 body; the precise
//! reason is only logged.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{debug, warn};
use user_app_shared::AuthError;

const BEARER_SCHEME: &str = "Bearer";

/// Authenticated caller, inserted into request extensions by `require_auth`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}

/// Extract the bearer token from the request headers
///
/// The header must split on whitespace into exactly `Bearer <token>`; the
/// scheme name is case-sensitive. Runs of spaces or tabs between the two
/// parts count as one separator.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingHeader)?;
    if value.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let value = value.to_str().map_err(|_| AuthError::InvalidHeaderFormat)?;
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) => Ok(token),
        _ => Err(AuthError::InvalidHeaderFormat),
    }
}

/// Request gate for protected routes
///
/// Apply with `axum::middleware::from_fn_with_state`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).map_err(|reason| {
        debug!(path = %request.uri().path(), %reason, "Rejected request");
        reason
    })?;

    let claims = state
        .tokens()
        .verify_token(token, Utc::now())
        .map_err(|error| {
            warn!(path = %request.uri().path(), %error, "Token verification failed");
            AuthError::InvalidToken
        })?;

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(request).await)
}
