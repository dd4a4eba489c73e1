//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no user-domain knowledge:
//! - Cryptographic utilities (HMAC-SHA256, base64, random bytes)
//! - Password hashing (Argon2id) and password policy
//! - Bearer token extraction from request headers
//! - Image normalisation for uploaded avatars

pub mod bearer;
pub mod crypto;
pub mod imaging;
pub mod password;
