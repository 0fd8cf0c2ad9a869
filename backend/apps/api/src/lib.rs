//! Blog API Server
//!
//! Wires the `auth` and `blog` crates into one HTTP application.

pub mod app;
pub mod config;
pub mod method_override;

pub use app::{App, AppParts, build_app};
pub use config::AppConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
