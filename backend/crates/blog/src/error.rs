//! Blog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::view::{PageError, Views};
use std::sync::Arc;
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    /// Missing or blank post fields
    #[error("{0}")]
    Validation(String),

    #[error("Post not found")]
    PostNotFound,

    /// Post belongs to another user
    #[error("You can only change your own posts")]
    NotOwner,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BlogError::Validation(_) => StatusCode::BAD_REQUEST,
            BlogError::PostNotFound => StatusCode::NOT_FOUND,
            BlogError::NotOwner => StatusCode::FORBIDDEN,
            BlogError::Database(_) | BlogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::PostNotFound => ErrorKind::NotFound,
            BlogError::NotOwner => ErrorKind::Forbidden,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError, hiding server-side details
    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::Database(_) | BlogError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            BlogError::PostNotFound => AppError::not_found(self.to_string())
                .with_action("The post may have been deleted"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    pub fn log(&self) {
        match self {
            BlogError::Database(e) => tracing::error!(error = %e, "Blog database error"),
            BlogError::Internal(msg) => tracing::error!(message = %msg, "Blog internal error"),
            BlogError::NotOwner => tracing::warn!("Post access by non-owner refused"),
            _ => tracing::debug!(error = %self, "Blog error"),
        }
    }

    /// Render as the HTML error page
    pub fn into_page(self, views: &Arc<Views>) -> Response {
        self.log();
        PageError::new(views.clone(), self.to_app_error()).into_response()
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
