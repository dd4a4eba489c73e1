//! Sign Up Use Case
//!
//! Creates a user and signs them in with a first token.

use std::sync::Arc;

use crate::application::config::UsersConfig;
use crate::application::token::TokenSigner;
use crate::domain::entity::{auth_token::AuthToken, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    age::Age,
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{UsersError, UsersResult};

pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: Option<i64>,
}

/// A user together with a freshly issued bearer token
pub struct IssuedSession {
    pub user: User,
    pub token: String,
}

pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<UsersConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<UsersConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> UsersResult<IssuedSession> {
        let name = UserName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let age = match input.age {
            Some(years) => Age::new(years)?,
            None => Age::default(),
        };
        let raw_password = RawPassword::new(input.password)?;

        // Cheap pre-check; the repository still enforces uniqueness
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(UsersError::EmailTaken);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(name, email, password, age);
        let token = AuthToken::issue_for(user.user_id);
        self.user_repo.create(&user, &token).await?;

        let bearer = TokenSigner::new(self.config.token_secret).sign(&token);

        tracing::info!(
            user_id = %user.user_id,
            token_id = %token.token_id,
            "User signed up"
        );

        Ok(IssuedSession {
            user,
            token: bearer,
        })
    }
}
