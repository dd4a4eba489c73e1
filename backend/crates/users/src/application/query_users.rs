use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{UsersError, UsersResult};

/// Read-only lookups
pub struct QueryUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> QueryUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn list(&self) -> UsersResult<Vec<User>> {
        self.user_repo.list().await
    }

    pub async fn get(&self, user_id: &UserId) -> UsersResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UsersError::UserNotFound)
    }
}
