//! User management routes

use crate::error::ApiResult;
use crate::extract::{UserIdPath, ValidatedJson};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use user_app_shared::{
    CreateUserRequest, CreateUserResponse, MessageResponse, UpdateUserRequest, User,
    UserListResponse,
};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// GET /api/users
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<UserListResponse>> {
    let users = UserService::list(state.users()).await?;
    Ok(Json(users.into()))
}

/// GET /api/users/:id
async fn get_user(
    State(state): State<AppState>,
    UserIdPath { id }: UserIdPath,
) -> ApiResult<Json<User>> {
    Ok(Json(UserService::get(state.users(), id).await?))
}

/// POST /api/users
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<CreateUserResponse>)> {
    let user = UserService::create(state.users(), state.passwords(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// PUT /api/users/:id
async fn update_user(
    State(state): State<AppState>,
    UserIdPath { id }: UserIdPath,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<MessageResponse>> {
    UserService::update(state.users(), id, req).await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// DELETE /api/users/:id
async fn delete_user(
    State(state): State<AppState>,
    UserIdPath { id }: UserIdPath,
) -> ApiResult<Json<MessageResponse>> {
    UserService::delete(state.users(), id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
