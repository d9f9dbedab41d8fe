//! In-process user store
//!
//! Backs the test suite and `memory://` local runs. Mirrors the PostgreSQL
//! store's semantics: serial ids, unique usernames, `updated_at` bumped on
//! update.

use super::user::{Credential, NewUser, StoreError, UserChanges, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use user_app_shared::User;

#[derive(Default)]
struct Inner {
    next_id: i32,
    users: BTreeMap<i32, (User, String)>,
}

impl Inner {
    fn username_taken(&self, username: &str, except: Option<i32>) -> bool {
        self.users
            .values()
            .any(|(user, _)| user.username == username && Some(user.id) != except)
    }
}

/// In-memory `UserStore`
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
    offline: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable database; every call fails while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.check_online()?;
        let inner = self.inner.read().await;
        Ok(inner.users.values().map(|(user, _)| user.clone()).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_credential(&self, username: &str) -> Result<Option<Credential>, StoreError> {
        self.check_online()?;
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|(user, _)| user.username == username)
            .map(|(user, hash)| Credential {
                user_id: user.id,
                username: user.username.clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.write().await;
        if inner.username_taken(&new_user.username, None) {
            return Err(StoreError::UniqueViolation);
        }

        inner.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.next_id,
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            age: new_user.age,
            created_at: now,
            updated_at: now,
        };
        inner
            .users
            .insert(user.id, (user.clone(), new_user.password_hash));

        Ok(user)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&id) {
            return Ok(None);
        }
        if inner.username_taken(&changes.username, Some(id)) {
            return Err(StoreError::UniqueViolation);
        }

        let Some((user, _)) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        user.username = changes.username;
        user.email = changes.email;
        user.first_name = changes.first_name;
        user.last_name = changes.last_name;
        user.age = changes.age;
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.write().await;
        Ok(inner.users.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
