//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde_json::{Map, Value};
use std::sync::Arc;

use kernel::error::app_error::AppError;
use kernel::id::UserId;

use crate::application::config::UsersConfig;
use crate::application::{
    AuthenticatedUser, AvatarUpload, AvatarUseCase, DeleteUserUseCase, QueryUsersUseCase,
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase, UpdateUserUseCase,
};
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::schema::SchemaRegistry;
use crate::domain::value_object::avatar::Avatar;
use crate::error::{UsersError, UsersResult};
use crate::presentation::dto::{AuthResponse, SignInRequest, SignUpRequest, UserResponse};

/// Multipart field carrying the avatar file
const AVATAR_FIELD: &str = "avatar";

/// Shared state for users handlers
#[derive(Clone)]
pub struct UsersAppState<R>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<UsersConfig>,
    pub schema: Arc<SchemaRegistry>,
}

fn parse_user_id(raw: &str) -> UsersResult<UserId> {
    raw.parse().map_err(|_| UsersError::InvalidUserId)
}

fn bad_json(rejection: JsonRejection) -> UsersError {
    AppError::bad_request(rejection.body_text()).into()
}

// ============================================================================
// Sign Up / Sign In / Sign Out
// ============================================================================

/// POST /users
pub async fn sign_up<R>(
    State(state): State<UsersAppState<R>>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> UsersResult<impl IntoResponse>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(bad_json)?;
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let session = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
            age: req.age,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse::from(session.user),
            token: session.token,
        }),
    ))
}

/// POST /users/login
pub async fn sign_in<R>(
    State(state): State<UsersAppState<R>>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> UsersResult<Json<AuthResponse>>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(|_| UsersError::InvalidCredentials)?;
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let session = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(session.user),
        token: session.token,
    }))
}

/// POST /users/logout
pub async fn sign_out<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    SignOutUseCase::new(state.repo.clone())
        .execute(&auth.token_id)
        .await?;

    Ok(StatusCode::OK)
}

/// POST /users/logoutAll
pub async fn sign_out_all<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    SignOutUseCase::new(state.repo.clone())
        .execute_all(&auth.user.user_id)
        .await?;

    Ok(StatusCode::OK)
}

// ============================================================================
// Current User
// ============================================================================

/// GET /users/me
pub async fn me(Extension(auth): Extension<AuthenticatedUser>) -> Json<UserResponse> {
    Json(UserResponse::from(auth.user))
}

/// PATCH /users/me
pub async fn update_me<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> UsersResult<Json<UserResponse>>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let Json(changes) = body.map_err(bad_json)?;
    update(&state, &auth.user.user_id, changes).await
}

/// DELETE /users/me
pub async fn delete_me<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> UsersResult<Json<UserResponse>>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let user = DeleteUserUseCase::new(state.repo.clone())
        .execute(&auth.user.user_id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

// ============================================================================
// Avatar
// ============================================================================

/// POST /users/me/avatar (multipart, field `avatar`)
pub async fn upload_avatar<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> UsersResult<StatusCode>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let limit = state.config.avatar_max_bytes;
    let multipart_error = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UsersError::AvatarTooLarge { limit }
        } else {
            AppError::bad_request(e.body_text()).into()
        }
    };

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        upload = Some(AvatarUpload {
            file_name,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload = upload.ok_or(UsersError::AvatarRequired)?;
    AvatarUseCase::new(state.repo.clone(), state.config.clone())
        .upload(&auth.user.user_id, upload)
        .await?;

    Ok(StatusCode::OK)
}

/// DELETE /users/me/avatar
pub async fn delete_avatar<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    AvatarUseCase::new(state.repo.clone(), state.config.clone())
        .remove(&auth.user.user_id)
        .await?;

    Ok(StatusCode::OK)
}

/// GET /users/{id}/avatar
pub async fn get_avatar<R>(
    State(state): State<UsersAppState<R>>,
    Path(id): Path<String>,
) -> UsersResult<impl IntoResponse>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let avatar = AvatarUseCase::new(state.repo.clone(), state.config.clone())
        .get(&user_id)
        .await?;

    Ok((
        [(header::CONTENT_TYPE, Avatar::CONTENT_TYPE)],
        avatar.into_bytes(),
    ))
}

// ============================================================================
// Users by ID
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<UsersAppState<R>>,
) -> UsersResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let users = QueryUsersUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_user<R>(
    State(state): State<UsersAppState<R>>,
    Path(id): Path<String>,
) -> UsersResult<Json<UserResponse>>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = QueryUsersUseCase::new(state.repo.clone())
        .get(&user_id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/{id}
pub async fn update_user<R>(
    State(state): State<UsersAppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> UsersResult<Json<UserResponse>>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let Json(changes) = body.map_err(bad_json)?;
    update(&state, &user_id, changes).await
}

/// DELETE /users/{id}
pub async fn delete_user<R>(
    State(state): State<UsersAppState<R>>,
    Path(id): Path<String>,
) -> UsersResult<Json<UserResponse>>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = DeleteUserUseCase::new(state.repo.clone())
        .execute(&user_id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

async fn update<R>(
    state: &UsersAppState<R>,
    user_id: &UserId,
    changes: Map<String, Value>,
) -> UsersResult<Json<UserResponse>>
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        UpdateUserUseCase::new(state.repo.clone(), state.schema.clone(), state.config.clone());
    let user = use_case.execute(user_id, changes).await?;

    Ok(Json(UserResponse::from(user)))
}
