//! Shared Kernel - vocabulary shared by every blog crate
//!
//! This crate holds the pieces whose meaning is identical across the
//! auth and blog domains:
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - Typed UUID identifiers for users and posts
//!
//! Anything domain-specific belongs in the owning crate instead.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
