//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{TokenId, UserId};

use crate::domain::entity::{auth_token::AuthToken, user::User};
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::value_object::{
    age::Age, avatar::Avatar, email::Email, user_name::UserName, user_password::UserPassword,
};
use crate::error::{UsersError, UsersResult};

const USER_COLUMNS: &str = r#"
    user_id,
    name,
    email,
    password_hash,
    age,
    avatar,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed users repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique-email violations surface as `EmailTaken`, everything else as-is
fn map_write_error(err: sqlx::Error) -> UsersError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => UsersError::EmailTaken,
        _ => UsersError::Database(err),
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User, first_token: &AuthToken) -> UsersResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password_hash,
                age,
                avatar,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.age.value())
        .bind(user.avatar.as_ref().map(Avatar::as_bytes))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        insert_token(&mut *tx, first_token).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> UsersResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> UsersResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list(&self) -> UsersResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, user_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update(&self, user: &User) -> UsersResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                age = $5,
                avatar = $6,
                updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.age.value())
        .bind(user.avatar.as_ref().map(Avatar::as_bytes))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn set_avatar(&self, user_id: &UserId, avatar: Option<&Avatar>) -> UsersResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                avatar = $2,
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(avatar.map(Avatar::as_bytes))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, user_id: &UserId) -> UsersResult<Option<User>> {
        // auth_tokens rows go with it (ON DELETE CASCADE)
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "DELETE FROM users WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Auth Token Repository Implementation
// ============================================================================

impl AuthTokenRepository for PgUserRepository {
    async fn create_token(&self, token: &AuthToken) -> UsersResult<()> {
        insert_token(&self.pool, token).await
    }

    async fn find_token(&self, token_id: &TokenId) -> UsersResult<Option<AuthToken>> {
        let row = sqlx::query_as::<_, AuthTokenRow>(
            "SELECT token_id, user_id, created_at FROM auth_tokens WHERE token_id = $1",
        )
        .bind(token_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthTokenRow::into_token))
    }

    async fn delete_token(&self, token_id: &TokenId) -> UsersResult<bool> {
        let deleted = sqlx::query("DELETE FROM auth_tokens WHERE token_id = $1")
            .bind(token_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_tokens_for_user(&self, user_id: &UserId) -> UsersResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

async fn insert_token<'e, E>(executor: E, token: &AuthToken) -> UsersResult<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO auth_tokens (token_id, user_id, created_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(token.token_id.as_uuid())
    .bind(token.user_id.as_uuid())
    .bind(token.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    age: i32,
    avatar: Option<Vec<u8>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> UsersResult<User> {
        let password = UserPassword::from_phc_string(self.password_hash)?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            password,
            age: Age::from_db(self.age),
            avatar: self.avatar.map(Avatar::from_png),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthTokenRow {
    token_id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl AuthTokenRow {
    fn into_token(self) -> AuthToken {
        AuthToken {
            token_id: TokenId::from_uuid(self.token_id),
            user_id: UserId::from_uuid(self.user_id),
            created_at: self.created_at,
        }
    }
}
