//! Sign Out Use Case
//!
//! Revokes the presenting token, or every token of the user.

use std::sync::Arc;

use kernel::id::{TokenId, UserId};

use crate::domain::repository::AuthTokenRepository;
use crate::error::UsersResult;

pub struct SignOutUseCase<T>
where
    T: AuthTokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> SignOutUseCase<T>
where
    T: AuthTokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// Revoke one token (idempotent)
    pub async fn execute(&self, token_id: &TokenId) -> UsersResult<()> {
        let revoked = self.token_repo.delete_token(token_id).await?;

        tracing::info!(token_id = %token_id, revoked, "User signed out");
        Ok(())
    }

    /// Revoke every token of `user_id`, including the presenting one
    pub async fn execute_all(&self, user_id: &UserId) -> UsersResult<u64> {
        let revoked = self.token_repo.delete_tokens_for_user(user_id).await?;

        tracing::info!(
            user_id = %user_id,
            revoked = revoked,
            "User signed out from all sessions"
        );

        Ok(revoked)
    }
}
