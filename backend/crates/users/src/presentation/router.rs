//! Users Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::UsersConfig;
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::schema::SchemaRegistry;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, UsersAppState};
use crate::presentation::middleware::require_auth;

/// Slack for multipart framing on top of the avatar limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the Users router with PostgreSQL repository
pub fn users_router(repo: PgUserRepository, config: UsersConfig) -> Router {
    users_router_generic(repo, config)
}

/// Create a generic Users router for any repository implementation
pub fn users_router_generic<R>(repo: R, config: UsersConfig) -> Router
where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let body_limit = config.avatar_max_bytes + MULTIPART_OVERHEAD;
    let state = UsersAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        schema: Arc::new(SchemaRegistry::new()),
    };

    let public = Router::new()
        .route("/users", post(handlers::sign_up::<R>))
        .route("/users/login", post(handlers::sign_in::<R>))
        .route("/users/{id}/avatar", get(handlers::get_avatar::<R>));

    let protected = Router::new()
        .route("/users", get(handlers::list_users::<R>))
        .route("/users/logout", post(handlers::sign_out::<R>))
        .route("/users/logoutAll", post(handlers::sign_out_all::<R>))
        .route(
            "/users/me",
            get(handlers::me)
                .patch(handlers::update_me::<R>)
                .delete(handlers::delete_me::<R>),
        )
        .route(
            "/users/me/avatar",
            post(handlers::upload_avatar::<R>)
                .delete(handlers::delete_avatar::<R>)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .patch(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    public.merge(protected).with_state(state)
}
