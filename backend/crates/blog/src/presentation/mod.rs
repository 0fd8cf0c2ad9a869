//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod admin;
pub mod dto;
pub mod handlers;
pub mod public;
pub mod router;

pub use handlers::BlogAppState;
pub use router::{admin_router, public_router};
