//! Bearer token extraction
//!
//! Pulls the credential out of an `Authorization: Bearer <token>` header.

use axum::http::{HeaderMap, header};

/// Error when extracting a bearer token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header is not a bearer credential")]
    WrongScheme,

    #[error("Bearer token is empty")]
    Empty,
}

/// Extract the bearer token from request headers
///
/// The scheme is matched case-insensitively (RFC 7235); the token itself
/// is returned with surrounding whitespace trimmed.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(BearerError::Missing)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(BearerError::WrongScheme)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::WrongScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::Empty);
    }

    Ok(token)
}
