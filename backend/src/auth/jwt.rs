//! Session token issuance and verification
//!
//! Tokens are HS256-signed JWTs carrying a fixed claim set. Keys are derived
//! once from the configured secret and shared behind `Arc`s.
//!
//! Verification order matters: the declared algorithm is checked before any
//! key is used, the signature before any claim is read, and expiry last.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// The only algorithm tokens may declare.
pub const EXPECTED_ALGORITHM: Algorithm = Algorithm::HS256;

/// Upper bound for the configured token lifetime (one year)
pub const MAX_LIFETIME_SECS: i64 = 365 * 24 * 60 * 60;

/// Session claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub user_id: i32,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token failures
///
/// These are for logs and callers inside the service. Clients only ever see
/// a single generic rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("unexpected signing algorithm {0:?}")]
    UnexpectedAlgorithm(Algorithm),

    #[error("token signature does not verify")]
    Signature,

    #[error("token expired")]
    Expired,

    #[error("token lifetime must be between 1 and {max} seconds, got {0}", max = MAX_LIFETIME_SECS)]
    InvalidLifetime(i64),
}

/// Pre-computed JWT keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Token service
///
/// Issuing and verifying are pure functions of the key, the token and the
/// supplied clock reading, so the service is freely shared across requests.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service
    ///
    /// Call once at startup and keep it in `AppState`. The lifetime must lie
    /// in `1..=MAX_LIFETIME_SECS`.
    pub fn new(secret: &str, lifetime_secs: i64) -> Result<Self, TokenError> {
        if !(1..=MAX_LIFETIME_SECS).contains(&lifetime_secs) {
            return Err(TokenError::InvalidLifetime(lifetime_secs));
        }
        let lifetime =
            Duration::try_seconds(lifetime_secs).ok_or(TokenError::InvalidLifetime(lifetime_secs))?;

        Ok(Self {
            keys: JwtKeys::new(secret),
            lifetime,
        })
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Issue a token for `user_id`, valid from `now` for the configured lifetime
    pub fn issue_token(&self, user_id: i32, now: DateTime<Utc>) -> Result<String, TokenError> {
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| TokenError::Signing("expiry is out of range".to_string()))?;
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(EXPECTED_ALGORITHM), &claims, self.keys.encoding())
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its claims
    ///
    /// A token is expired once `now` reaches its `exp`.
    pub fn verify_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;
        if header.alg != EXPECTED_ALGORITHM {
            return Err(TokenError::UnexpectedAlgorithm(header.alg));
        }

        let claims = decode::<Claims>(token, self.keys.decoding(), &Self::validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::Signature,
                ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm(header.alg),
                _ => TokenError::Malformed(e.to_string()),
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Signature-only validation; expiry is checked against the caller's clock.
    fn validation() -> Validation {
        let mut validation = Validation::new(EXPECTED_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation
    }
}
