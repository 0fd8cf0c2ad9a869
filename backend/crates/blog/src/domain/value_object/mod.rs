//! Value Object Module

pub mod owner_ref;
pub mod post_content;

pub use kernel::id::PostId;
