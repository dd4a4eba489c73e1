//! User Password Value Object
//!
//! Domain wrappers around `platform::password`: `RawPassword` for input,
//! `UserPassword` for the stored Argon2id hash.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user; zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate against the password policy
    ///
    /// Errors carry client-facing messages (400).
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => AppError::bad_request(format!(
                "Password must be at least {} characters",
                min
            ))
            .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { max, .. } => AppError::bad_request(format!(
                "Password must be at most {} characters",
                max
            )),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password is required")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }

            PasswordPolicyError::ContainsForbiddenWord => {
                AppError::bad_request("Password cannot contain \"password\"")
            }
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing")
            }
        })?;

        Ok(Self(hashed))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
