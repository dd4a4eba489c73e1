//! Error conversions
//!
//! Database error classification and the HTTP rendering of [`AppError`].

#[allow(unused_imports)]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify without taking ownership; the caller keeps the original error
/// for logging. Messages are generic and safe to show clients.
#[cfg(feature = "sqlx")]
impl From<&sqlx::Error> for AppError {
    fn from(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted")
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    Some("23503") => AppError::conflict("Foreign key violation"),
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                }
            }
            sqlx::Error::Io(_) | sqlx::Error::PoolClosed => {
                AppError::service_unavailable("Database connection error")
            }
            _ => AppError::internal("Database error"),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::from(&err).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = serde_json::Map::new();
        body.insert("error".into(), self.message().into());
        if let Some(action) = self.action() {
            body.insert("action".into(), action.into());
        }

        (status, Json(serde_json::Value::Object(body))).into_response()
    }
}
