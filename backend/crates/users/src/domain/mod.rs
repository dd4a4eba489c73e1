//! Domain Layer
//!
//! Entities, value objects, the declared update schema, the update
//! authorizer and repository traits.

pub mod entity;
pub mod repository;
pub mod schema;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{auth_token::AuthToken, user::User};
pub use repository::{AuthTokenRepository, UserRepository};
pub use schema::{EntitySchema, EntityType, SchemaProvider, SchemaRegistry};
pub use services::{DisallowedFieldError, UpdateDecision, authorize};
