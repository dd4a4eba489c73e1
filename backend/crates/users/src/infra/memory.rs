//! In-memory Repository
//!
//! Process-local storage behind a tokio `RwLock`. Same contract as the
//! PostgreSQL repository, including unique emails and token cascade on
//! user deletion.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use kernel::id::{TokenId, UserId};

use crate::domain::entity::{auth_token::AuthToken, user::User};
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::value_object::{avatar::Avatar, email::Email};
use crate::error::{UsersError, UsersResult};

#[derive(Default)]
struct Store {
    users: HashMap<UserId, User>,
    tokens: HashMap<TokenId, AuthToken>,
}

impl Store {
    fn email_owner(&self, email: &Email) -> Option<&User> {
        self.users.values().find(|user| &user.email == email)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens of one user, oldest first
    #[cfg(test)]
    pub(crate) async fn tokens_for_user(&self, user_id: &UserId) -> Vec<AuthToken> {
        let store = self.store.read().await;

        let mut tokens: Vec<AuthToken> = store
            .tokens
            .values()
            .filter(|token| &token.user_id == user_id)
            .cloned()
            .collect();
        tokens.sort_by_key(|token| token.created_at);

        tokens
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User, first_token: &AuthToken) -> UsersResult<()> {
        let mut store = self.store.write().await;

        if store.email_owner(&user.email).is_some() {
            return Err(UsersError::EmailTaken);
        }
        if first_token.user_id != user.user_id {
            return Err(UsersError::Internal(
                "First token issued for a different user".to_string(),
            ));
        }

        store.users.insert(user.user_id, user.clone());
        store.tokens.insert(first_token.token_id, first_token.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> UsersResult<Option<User>> {
        Ok(self.store.read().await.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> UsersResult<Option<User>> {
        Ok(self.store.read().await.email_owner(email).cloned())
    }

    async fn list(&self) -> UsersResult<Vec<User>> {
        let store = self.store.read().await;

        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.user_id.as_uuid().cmp(b.user_id.as_uuid()))
        });

        Ok(users)
    }

    async fn update(&self, user: &User) -> UsersResult<bool> {
        let mut store = self.store.write().await;

        if store
            .email_owner(&user.email)
            .is_some_and(|owner| owner.user_id != user.user_id)
        {
            return Err(UsersError::EmailTaken);
        }

        match store.users.get_mut(&user.user_id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_avatar(&self, user_id: &UserId, avatar: Option<&Avatar>) -> UsersResult<bool> {
        let mut store = self.store.write().await;

        match store.users.get_mut(user_id) {
            Some(stored) => {
                match avatar {
                    Some(avatar) => stored.set_avatar(avatar.clone()),
                    None => stored.clear_avatar(),
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, user_id: &UserId) -> UsersResult<Option<User>> {
        let mut store = self.store.write().await;

        let removed = store.users.remove(user_id);
        if removed.is_some() {
            store.tokens.retain(|_, token| &token.user_id != user_id);
        }

        Ok(removed)
    }
}

impl AuthTokenRepository for InMemoryUserRepository {
    async fn create_token(&self, token: &AuthToken) -> UsersResult<()> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&token.user_id) {
            return Err(UsersError::UserNotFound);
        }

        store.tokens.insert(token.token_id, token.clone());
        Ok(())
    }

    async fn find_token(&self, token_id: &TokenId) -> UsersResult<Option<AuthToken>> {
        Ok(self.store.read().await.tokens.get(token_id).cloned())
    }

    async fn delete_token(&self, token_id: &TokenId) -> UsersResult<bool> {
        Ok(self.store.write().await.tokens.remove(token_id).is_some())
    }

    async fn delete_tokens_for_user(&self, user_id: &UserId) -> UsersResult<u64> {
        let mut store = self.store.write().await;

        let before = store.tokens.len();
        store.tokens.retain(|_, token| &token.user_id != user_id);

        Ok((before - store.tokens.len()) as u64)
    }
}
