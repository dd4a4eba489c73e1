//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - The unified error type and its HTTP mapping
//! - Typed identifiers for persisted entities
//!
//! Only things whose meaning is identical across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
