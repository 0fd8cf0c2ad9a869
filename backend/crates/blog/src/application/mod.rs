//! Application Layer
//!
//! Post service, authorization context, and policies.

pub mod config;
pub mod context;
pub mod posts;

// Re-exports
pub use config::{BlogConfig, ListingPolicy, OwnershipPolicy};
pub use context::AuthorizationContext;
pub use posts::{NewPost, PostEdit, PostService};
