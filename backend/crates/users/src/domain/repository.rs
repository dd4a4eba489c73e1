//! Repository Traits
//!
//! Persistence interfaces. Implementations live in the infrastructure layer.

use kernel::id::{TokenId, UserId};

use crate::domain::entity::{auth_token::AuthToken, user::User};
use crate::domain::value_object::{avatar::Avatar, email::Email};
use crate::error::UsersResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user together with its first token, all or nothing;
    /// `UsersError::EmailTaken` on a duplicate email
    async fn create(&self, user: &User, first_token: &AuthToken) -> UsersResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> UsersResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> UsersResult<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> UsersResult<Vec<User>>;

    /// Replace the stored user; `false` if it no longer exists
    async fn update(&self, user: &User) -> UsersResult<bool>;

    /// Write only the avatar column (`None` clears it); `false` if the
    /// user no longer exists
    async fn set_avatar(&self, user_id: &UserId, avatar: Option<&Avatar>) -> UsersResult<bool>;

    /// Remove a user together with its tokens, returning what was removed
    async fn delete(&self, user_id: &UserId) -> UsersResult<Option<User>>;
}

/// Issued-token repository trait
#[trait_variant::make(AuthTokenRepository: Send)]
pub trait LocalAuthTokenRepository {
    async fn create_token(&self, token: &AuthToken) -> UsersResult<()>;

    async fn find_token(&self, token_id: &TokenId) -> UsersResult<Option<AuthToken>>;

    async fn delete_token(&self, token_id: &TokenId) -> UsersResult<bool>;

    async fn delete_tokens_for_user(&self, user_id: &UserId) -> UsersResult<u64>;
}
