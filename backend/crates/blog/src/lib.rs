//! Blog (Post Management) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post entity, value objects, repository trait
//! - `application/` - Post service, authorization context, policies
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - Public and admin handlers, DTOs, routers
//!
//! ## Features
//! - Public listing, reading and anonymous create/edit/delete
//! - Admin dashboard scoped to the logged-in user's posts
//! - Admin create with forced ownership and a publish flag
//! - Optional owner-only edits and public-only listing

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    AuthorizationContext, BlogConfig, ListingPolicy, OwnershipPolicy, PostService,
};
pub use error::{BlogError, BlogResult};
pub use infra::{memory::MemoryPostRepository, postgres::PgPostRepository};
pub use presentation::{BlogAppState, admin_router, public_router};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::post::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::MemoryPostRepository as MemoryPostStore;
    pub use crate::infra::postgres::PgPostRepository as PostStore;
}
