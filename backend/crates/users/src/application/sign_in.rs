//! Sign In Use Case
//!
//! Checks email + password and issues an additional token.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::application::config::UsersConfig;
use crate::application::sign_up::IssuedSession;
use crate::application::token::TokenSigner;
use crate::domain::entity::auth_token::AuthToken;
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{UsersError, UsersResult};

lazy_static! {
    /// Verified against when the email is unknown, so both failure paths
    /// pay for one Argon2 verification
    static ref DUMMY_PASSWORD: Option<UserPassword> =
        RawPassword::new("Unused-Credential-7431".to_string())
            .and_then(|raw| UserPassword::from_raw(&raw, None))
            .ok();
}

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInUseCase<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<UsersConfig>,
}

impl<U, T> SignInUseCase<U, T>
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

    /// Every credential failure maps to `InvalidCredentials`. An unknown
    /// email still runs a password verification, so neither the response
    /// body nor the hashing work tells it apart from a wrong password.
    pub async fn execute(&self, input: SignInInput) -> UsersResult<IssuedSession> {
        let email = Email::new(&input.email).map_err(|_| UsersError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| UsersError::InvalidCredentials)?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                let _ = dummy.verify(&raw_password, self.config.pepper());
            }
            return Err(UsersError::InvalidCredentials);
        };

        if !user.password.verify(&raw_password, self.config.pepper()) {
            return Err(UsersError::InvalidCredentials);
        }

        let token = AuthToken::issue_for(user.user_id);
        self.token_repo.create_token(&token).await?;
        let bearer = TokenSigner::new(self.config.token_secret).sign(&token);

        tracing::info!(
            user_id = %user.user_id,
            token_id = %token.token_id,
            "User signed in"
        );

        Ok(IssuedSession {
            user,
            token: bearer,
        })
    }
}
