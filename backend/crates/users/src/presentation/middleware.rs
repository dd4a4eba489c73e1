//! Bearer Auth Middleware
//!
//! Resolves `Authorization: Bearer <token>` to an [`AuthenticatedUser`]
//! and stores it in request extensions for the handlers behind it.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use platform::bearer::extract_bearer_token;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::error::UsersError;
use crate::presentation::handlers::UsersAppState;

/// Middleware that requires a valid bearer token
pub async fn require_auth<R>(
    State(state): State<UsersAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, UsersError>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let bearer = extract_bearer_token(req.headers())?.to_owned();

    let use_case =
        AuthenticateUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let auth = use_case.execute(&bearer).await?;

    tracing::debug!(user_id = %auth.user.user_id, "Request authenticated");
    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
