//! Inbound username check, run before any provider is called

use crate::error::FetchError;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 15;

/// Accept 3-15 characters of ASCII letters, digits, `.` and `_`. A leading
/// `@` is not stripped; it is rejected like any other character.
pub fn validate_username(username: &str) -> Result<&str, FetchError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(FetchError::InvalidInput(format!(
            "Username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters, got {len}"
        )));
    }

    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '_'))
    {
        return Err(FetchError::InvalidInput(format!(
            "Username contains invalid character '{bad}'; only letters, numbers, dots and underscores are allowed"
        )));
    }

    Ok(username)
}
