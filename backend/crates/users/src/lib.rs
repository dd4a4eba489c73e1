//! Users Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, update schema and authorizer, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Sign up / login with email + password, one bearer token per login
//! - Logout of the current token or of every token
//! - Partial updates guarded by a field allow-list (`Invalid field!`)
//! - Avatar upload, normalised to a 250x250 PNG
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Bearer tokens are HMAC-signed token IDs, revoked by deleting the record

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::UsersConfig;
pub use error::{UsersError, UsersResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::{users_router, users_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
