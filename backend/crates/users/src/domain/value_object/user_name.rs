//! User Name Value Object
//!
//! Display name of a user. Required, surrounding whitespace removed.
//! Not unique and not used for login.

use kernel::error::app_error::{AppError, AppResult};

/// Upper bound on the stored name, in characters
pub const USER_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl AsRef<str>) -> AppResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Name is required"));
        }

        if name.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed() {
        let name = UserName::new("  Pranav Pande \n").unwrap();
        assert_eq!(name.as_str(), "Pranav Pande");
    }

    #[test]
    fn test_required() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new(" \t ").is_err());
    }

    #[test]
    fn test_length_limit() {
        assert!(UserName::new("é".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
    }
}
