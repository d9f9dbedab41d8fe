//! Data models for the User App

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account as exposed by the API
///
/// The stored password hash never leaves the backend; it lives on the
/// repository's credential record instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
