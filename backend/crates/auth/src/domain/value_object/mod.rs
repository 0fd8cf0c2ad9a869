//! Value Object Module

pub mod email;
pub mod user_name;
pub mod user_password;
pub mod verification_token;

pub use kernel::id::UserId;
