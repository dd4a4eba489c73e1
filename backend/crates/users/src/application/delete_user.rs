use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{UsersError, UsersResult};

/// Removes a user and, through the repository, all of its tokens
pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> UsersResult<User> {
        let user = self
            .user_repo
            .delete(user_id)
            .await?
            .ok_or(UsersError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, "User deleted");
        Ok(user)
    }
}
