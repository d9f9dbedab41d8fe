//! Input validation functions
//!
//! Plain validators return `Result<(), String>`; the `*_rule` adapters wrap
//! them for use with `#[validate(custom(...))]` derives.

use crate::types::Password;
use std::borrow::Cow;
use validator::ValidationError;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() > 50 {
        return Err("Username too long".to_string());
    }
    let username_regex = regex_lite::Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap();
    if !username_regex.is_match(username) {
        return Err(
            "Username may only contain letters, digits, '_', '.' and '-'".to_string(),
        );
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 bytes".to_string());
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES));
    }
    Ok(())
}

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

pub fn username_rule(username: &str) -> Result<(), ValidationError> {
    validate_username(username).map_err(|msg| rule_error("username", msg))
}

pub fn password_rule(password: &Password) -> Result<(), ValidationError> {
    validate_password(password.expose()).map_err(|msg| rule_error("password", msg))
}

/// Login only checks presence; strength rules apply at account creation.
pub fn password_present(password: &Password) -> Result<(), ValidationError> {
    if password.expose().is_empty() {
        return Err(rule_error("password", "Password is required".to_string()));
    }
    Ok(())
}
