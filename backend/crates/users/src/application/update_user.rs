//! Update User Use Case
//!
//! Partial update from a JSON object. The set of field names is checked
//! against the declared schema before storage is touched; only an
//! `Allowed` decision proceeds to per-field validation and persistence.

use std::sync::Arc;

use kernel::error::app_error::AppError;
use kernel::id::UserId;
use serde_json::{Map, Value};

use crate::application::config::UsersConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::schema::{EntityType, SchemaProvider};
use crate::domain::services::authorize;
use crate::domain::value_object::{
    age::Age,
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{UsersError, UsersResult};

pub struct UpdateUserUseCase<U, P>
where
    U: UserRepository,
    P: SchemaProvider,
{
    user_repo: Arc<U>,
    schema: Arc<P>,
    config: Arc<UsersConfig>,
}

impl<U, P> UpdateUserUseCase<U, P>
where
    U: UserRepository,
    P: SchemaProvider,
{
    pub fn new(user_repo: Arc<U>, schema: Arc<P>, config: Arc<UsersConfig>) -> Self {
        Self {
            user_repo,
            schema,
            config,
        }
    }

    pub async fn execute(&self, user_id: &UserId, changes: Map<String, Value>) -> UsersResult<User> {
        let schema = self.schema.declared_fields(EntityType::User);
        authorize(changes.keys().map(String::as_str), schema).into_result()?;

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UsersError::UserNotFound)?;

        if changes.is_empty() {
            return Ok(user);
        }

        let mut changed_fields = Vec::with_capacity(changes.len());
        for (field, value) in &changes {
            self.apply(&mut user, field, value)?;
            changed_fields.push(field.as_str());
        }

        let owner = self.user_repo.find_by_email(&user.email).await?;
        if owner.is_some_and(|owner| owner.user_id != user.user_id) {
            return Err(UsersError::EmailTaken);
        }

        if !self.user_repo.update(&user).await? {
            return Err(UsersError::UserNotFound);
        }

        tracing::info!(
            entity = %schema.entity(),
            user_id = %user.user_id,
            fields = ?changed_fields,
            "User updated"
        );

        Ok(user)
    }

    /// Validate one declared field and write it onto `user`
    fn apply(&self, user: &mut User, field: &str, value: &Value) -> UsersResult<()> {
        match field {
            "name" => user.set_name(UserName::new(expect_str(field, value)?)?),
            "email" => user.set_email(Email::new(expect_str(field, value)?)?),
            "password" => {
                let raw = RawPassword::new(expect_str(field, value)?.to_string())?;
                user.set_password(UserPassword::from_raw(&raw, self.config.pepper())?);
            }
            "age" => {
                let years = value
                    .as_i64()
                    .ok_or_else(|| AppError::bad_request("Age must be a number"))?;
                user.set_age(Age::new(years)?);
            }
            other => {
                // Declared in the schema but not settable through this use case
                return Err(UsersError::Internal(format!(
                    "No update handler for declared field `{other}`"
                )));
            }
        }

        Ok(())
    }
}

fn expect_str<'v>(field: &str, value: &'v Value) -> UsersResult<&'v str> {
    value
        .as_str()
        .ok_or_else(|| AppError::bad_request(format!("{field} must be a string")).into())
}
