//! Authenticate Use Case
//!
//! Resolves a bearer token to the user who owns it.

use std::sync::Arc;

use kernel::id::TokenId;

use crate::application::config::UsersConfig;
use crate::application::token::TokenSigner;
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::error::{UsersError, UsersResult};

/// The caller behind a valid token, stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// The token that authenticated this request (revoked by logout)
    pub token_id: TokenId,
}

pub struct AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<UsersConfig>,
}

impl<U, T> AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<UsersConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    /// Database failures propagate as such; everything else is
    /// `Unauthenticated`.
    pub async fn execute(&self, bearer: &str) -> UsersResult<AuthenticatedUser> {
        let token_id = TokenSigner::new(self.config.token_secret).verify(bearer)?;

        let token = self
            .token_repo
            .find_token(&token_id)
            .await?
            .ok_or(UsersError::Unauthenticated)?;

        let user = self
            .user_repo
            .find_by_id(&token.user_id)
            .await?
            .ok_or(UsersError::Unauthenticated)?;

        Ok(AuthenticatedUser {
            user,
            token_id: token.token_id,
        })
    }
}
