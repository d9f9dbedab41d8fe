//! Database repositories
//!
//! `UserStore` is the data access seam: services and the login flow receive
//! it as an explicit dependency, so the backing store can be PostgreSQL in
//! production and in-memory in tests.

pub mod memory;
pub mod user;

pub use memory::InMemoryUserStore;
pub use user::{Credential, NewUser, PgUserStore, StoreError, UserChanges, UserStore};
