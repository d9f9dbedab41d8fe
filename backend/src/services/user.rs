//! User management service

use super::with_timeout;
use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::{NewUser, UserChanges, UserStore};
use tracing::info;
use user_app_shared::{CreateUserRequest, UpdateUserRequest, User};

/// User CRUD operations
pub struct UserService;

impl UserService {
    pub async fn list(store: &dyn UserStore) -> Result<Vec<User>, ApiError> {
        Ok(with_timeout(store.list()).await?)
    }

    pub async fn get(store: &dyn UserStore, id: i32) -> Result<User, ApiError> {
        with_timeout(store.find_by_id(id))
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Create a user, hashing the password on the blocking pool
    pub async fn create(
        store: &dyn UserStore,
        passwords: &PasswordService,
        req: CreateUserRequest,
    ) -> Result<User, ApiError> {
        let password_hash = passwords
            .hash_async(req.password.into_secret())
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;

        let user = with_timeout(store.create(NewUser {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password_hash,
            age: req.age,
        }))
        .await?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn update(
        store: &dyn UserStore,
        id: i32,
        req: UpdateUserRequest,
    ) -> Result<User, ApiError> {
        let changes = UserChanges {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            age: req.age,
        };

        let user = with_timeout(store.update(id, changes))
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    pub async fn delete(store: &dyn UserStore, id: i32) -> Result<(), ApiError> {
        if !with_timeout(store.delete(id)).await? {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }
}
