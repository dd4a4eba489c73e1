//! Users Error Types
//!
//! Domain error variants that integrate with `kernel::error::AppError`.
//! Every variant renders as `{"error": "<message>"}`.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::services::DisallowedFieldError;

pub type UsersResult<T> = Result<T, UsersError>;

#[derive(Debug, Error)]
pub enum UsersError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email is already in use")]
    EmailTaken,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Unable to login")]
    InvalidCredentials,

    /// Missing, malformed, forged or revoked bearer token
    #[error("Please authenticate.")]
    Unauthenticated,

    /// PATCH named a field outside the declared schema
    #[error(transparent)]
    InvalidField(#[from] DisallowedFieldError),

    #[error("Invalid user id")]
    InvalidUserId,

    /// Field-level validation failure carrying its own message
    #[error("{}", .0.message())]
    Validation(AppError),

    #[error("Please upload an image")]
    AvatarRequired,

    #[error("Avatar must be at most {limit} bytes")]
    AvatarTooLarge { limit: usize },

    #[error("Avatar not found")]
    AvatarNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UsersError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UsersError::UserNotFound | UsersError::AvatarNotFound => ErrorKind::NotFound,
            UsersError::EmailTaken => ErrorKind::Conflict,
            UsersError::InvalidCredentials
            | UsersError::InvalidField(_)
            | UsersError::InvalidUserId
            | UsersError::AvatarRequired => ErrorKind::BadRequest,
            UsersError::Validation(err) => err.kind(),
            UsersError::Unauthenticated => ErrorKind::Unauthorized,
            UsersError::AvatarTooLarge { .. } => ErrorKind::PayloadTooLarge,
            UsersError::Database(e) => AppError::from(e).kind(),
            UsersError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Client-facing error; server-side detail stays in the logs
    pub fn to_app_error(&self) -> AppError {
        match self {
            UsersError::Validation(err) => {
                let app_err = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => app_err.with_action(action.to_string()),
                    None => app_err,
                }
            }
            UsersError::Database(e) => {
                let app_err = AppError::from(e);
                if app_err.is_client_error() {
                    app_err
                } else {
                    AppError::new(app_err.kind(), "Something went wrong")
                }
            }
            UsersError::Internal(_) => AppError::internal("Something went wrong"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            UsersError::Database(e) => {
                tracing::error!(error = %e, "Users database error");
            }
            UsersError::Internal(msg) => {
                tracing::error!(message = %msg, "Users internal error");
            }
            UsersError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            UsersError::InvalidField(_) => {
                tracing::info!("Update rejected: undeclared field");
            }
            _ => {
                tracing::debug!(error = %self, "Users error");
            }
        }
    }
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for UsersError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            UsersError::Validation(err)
        } else {
            UsersError::Internal(err.to_string())
        }
    }
}

impl From<platform::bearer::BearerError> for UsersError {
    fn from(_: platform::bearer::BearerError) -> Self {
        UsersError::Unauthenticated
    }
}
