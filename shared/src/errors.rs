//! Error types for the User App

use thiserror::Error;

/// Authentication failures as reported to clients
///
/// The display strings are the exact messages sent over the wire. They are
/// deliberately coarse: a client learns that authentication failed, never
/// which check rejected it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authorization header missing")]
    MissingHeader,

    #[error("Invalid authorization header format")]
    InvalidHeaderFormat,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Unauthorized")]
    Unauthenticated,
}
