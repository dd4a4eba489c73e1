//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod avatar;
pub mod config;
pub mod delete_user;
pub mod query_users;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;
pub mod update_user;

// Re-exports
pub use authenticate::{AuthenticateUseCase, AuthenticatedUser};
pub use avatar::{AvatarUpload, AvatarUseCase};
pub use config::UsersConfig;
pub use delete_user::DeleteUserUseCase;
pub use query_users::QueryUsersUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{IssuedSession, SignUpInput, SignUpUseCase};
pub use token::TokenSigner;
pub use update_user::UpdateUserUseCase;
