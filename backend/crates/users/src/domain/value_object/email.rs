//! Email Value Object
//!
//! Trimmed, lower-cased address with a basic shape check.
//! Uniqueness is enforced by the repository, not here.

use kernel::error::app_error::{AppError, AppResult};
use std::str::FromStr;

/// Maximum email length (RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;
/// Maximum local part length (RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> AppResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email is required"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !is_valid_format(&email) {
            return Err(AppError::bad_request("Email is invalid")
                .with_action("Please enter a valid email address"));
        }

        Ok(Self(email))
    }

    /// Rehydrate from storage (already validated on the way in)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_format(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH || domain.contains('@') {
        return false;
    }

    if local.chars().any(char::is_whitespace) {
        return false;
    }

    if !domain.contains('.')
        || !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    // every label non-empty and not hyphen-bounded
    domain
        .split('.')
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
