//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! users crate.

use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use users::{PgUserRepository, UsersConfig, users_router};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,users=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let users_config = load_users_config()?;
    let users_repo = PgUserRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .merge(users_router(users_repo, users_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = match env::var("PORT") {
        Ok(port) => port.parse()?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    pool.close().await;
    Ok(())
}

/// Users configuration from the environment
///
/// Debug builds fall back to a random token secret when
/// `USERS_TOKEN_SECRET` is unset; release builds refuse to start.
fn load_users_config() -> anyhow::Result<UsersConfig> {
    let base = match env::var("USERS_TOKEN_SECRET") {
        Ok(secret_b64) => {
            let secret_bytes = platform::crypto::from_base64(&secret_b64)?;
            anyhow::ensure!(
                secret_bytes.len() == 32,
                "USERS_TOKEN_SECRET must decode to 32 bytes, got {}",
                secret_bytes.len()
            );
            let mut secret = [0u8; 32];
            secret.copy_from_slice(&secret_bytes);
            UsersConfig {
                token_secret: secret,
                ..UsersConfig::default()
            }
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("USERS_TOKEN_SECRET not set, using a random secret");
            UsersConfig::default()
        }
        Err(_) => anyhow::bail!("USERS_TOKEN_SECRET must be set in production"),
    };

    let password_pepper = env::var("USERS_PASSWORD_PEPPER")
        .ok()
        .filter(|pepper| !pepper.is_empty())
        .map(String::into_bytes);

    Ok(UsersConfig {
        password_pepper,
        ..base
    })
}
