//! Authentication routes
//!
//! Login is public; logout and verify sit behind the request gate.
//!
//! Logout is client-side only: the session cookie is cleared but the token
//! stays valid until it expires, since no revocation list exists.

use crate::auth::{require_auth, AuthUser};
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::header::SET_COOKIE,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::info;
use user_app_shared::{LoginRequest, LoginResponse, LogoutResponse, VerifyResponse};

/// Expires the `session` cookie on the client
const CLEAR_SESSION_COOKIE: &str = "session=; Path=/; Max-Age=0; HttpOnly; Secure";

/// Create auth routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/verify", get(verify))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
        .route("/login", post(login))
}

/// Login with username and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = AuthService::login(state.users(), state.tokens(), req).await?;
    Ok(Json(response))
}

/// POST /api/auth/logout
async fn logout(auth_user: AuthUser) -> impl IntoResponse {
    info!(user_id = auth_user.user_id, "User logged out");

    (
        [(SET_COOKIE, CLEAR_SESSION_COOKIE)],
        Json(LogoutResponse {
            message: "Logout successful".to_string(),
            details: "Session cookie cleared; discard the token on the client".to_string(),
        }),
    )
}

/// GET /api/auth/verify
async fn verify(auth_user: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        message: "Token valid".to_string(),
        user_id: auth_user.user_id,
    })
}
