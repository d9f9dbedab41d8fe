//! User repository for database operations

use crate::db;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use user_app_shared::User;

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("username already exists")]
    UniqueViolation,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Stored credential for one user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credential {
    pub user_id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Input for creating a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub age: Option<i32>,
}

/// Full replacement of a user's profile fields
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
}

/// User persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users ordered by id
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    /// Credential lookup for the login flow
    async fn find_credential(&self, username: &str) -> Result<Option<Credential>, StoreError>;

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Returns `None` when no user has this id
    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, StoreError>;

    /// Returns `false` when no user has this id
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Health check
    async fn ping(&self) -> Result<(), StoreError>;
}

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRecord {
    id: i32,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    age: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            username: record.username,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            age: record.age,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::UniqueViolation,
        _ => StoreError::Database(err),
    }
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, first_name, last_name, age, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, first_name, last_name, age, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(User::from))
    }

    async fn find_credential(&self, username: &str) -> Result<Option<Credential>, StoreError> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id AS user_id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash, age)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, first_name, last_name, age, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.password_hash)
        .bind(new_user.age)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(user.into())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                username = $2,
                email = $3,
                first_name = $4,
                last_name = $5,
                age = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, first_name, last_name, age, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(changes.age)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(user.map(User::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        db::health_check(&self.pool).await.map_err(StoreError::Database)
    }
}
