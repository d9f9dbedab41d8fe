//! Authentication module
//!
//! HS256 session tokens, bcrypt/argon2 password hashing and the request
//! gate that guards protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtKeys, TokenError, TokenService, EXPECTED_ALGORITHM, MAX_LIFETIME_SECS};
pub use middleware::{bearer_token, require_auth, AuthUser};
pub use password::{PasswordError, PasswordService};
