//! Request extractors with API-shaped rejections
//!
//! Axum's stock `Json` and `Path` rejections answer with plain text and,
//! for JSON data errors, 422. These wrappers turn every binding failure
//! into a 400 `ApiError` body.

use crate::error::ApiError;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

/// JSON body that has been deserialized and validated
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// `/:id` path segment
#[derive(Debug, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct UserIdPath {
    pub id: i32,
}
