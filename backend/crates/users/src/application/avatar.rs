//! Avatar Use Case
//!
//! Upload, fetch and remove the profile picture of a user.

use std::sync::Arc;

use kernel::error::{app_error::ResultExt, kind::ErrorKind};
use kernel::id::UserId;
use platform::imaging::{has_accepted_extension, normalize_to_png};

use crate::application::config::UsersConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::avatar::Avatar;
use crate::error::{UsersError, UsersResult};

/// A file received from the client, before normalisation
pub struct AvatarUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct AvatarUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<UsersConfig>,
}

impl<U> AvatarUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<UsersConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Validate, normalise and store an avatar for `user_id`. Only the
    /// avatar is written; other fields keep whatever is stored.
    pub async fn upload(&self, user_id: &UserId, upload: AvatarUpload) -> UsersResult<()> {
        let limit = self.config.avatar_max_bytes;
        if upload.bytes.len() > limit {
            return Err(UsersError::AvatarTooLarge { limit });
        }

        if !has_accepted_extension(&upload.file_name) {
            return Err(UsersError::AvatarRequired);
        }

        let edge = self.config.avatar_edge;
        let png = tokio::task::spawn_blocking(move || normalize_to_png(&upload.bytes, edge))
            .await
            .map_err(|e| UsersError::Internal(format!("Avatar task failed: {e}")))?
            .map_app_err(ErrorKind::BadRequest, "Unable to process image")?;

        let size = png.len();
        let avatar = Avatar::from_png(png);
        if !self.user_repo.set_avatar(user_id, Some(&avatar)).await? {
            return Err(UsersError::UserNotFound);
        }

        tracing::info!(%user_id, size, "Avatar uploaded");
        Ok(())
    }

    /// Stored PNG of `user_id`
    pub async fn get(&self, user_id: &UserId) -> UsersResult<Avatar> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UsersError::UserNotFound)?;

        user.avatar.ok_or(UsersError::AvatarNotFound)
    }

    /// Idempotent; succeeds when no avatar is set
    pub async fn remove(&self, user_id: &UserId) -> UsersResult<()> {
        if !self.user_repo.set_avatar(user_id, None).await? {
            return Err(UsersError::UserNotFound);
        }

        tracing::info!(%user_id, "Avatar removed");
        Ok(())
    }
}
