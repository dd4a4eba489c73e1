//! Value Object Module

pub mod age;
pub mod avatar;
pub mod email;
pub mod user_name;
pub mod user_password;
