//! Server-side Views
//!
//! Thin wrapper over a loaded [`Tera`] instance plus an error page response
//! for HTML routes.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use kernel::error::app_error::{AppError, AppResult};
use tera::Tera;

pub use tera::Context;

/// Template used by [`PageError`]
pub const ERROR_TEMPLATE: &str = "error.html";

/// Loaded template set
#[derive(Debug)]
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Load every template matching `glob` (e.g. `templates/**/*.html`)
    pub fn from_glob(glob: &str) -> Result<Self, tera::Error> {
        let tera = Tera::new(glob)?;
        tracing::debug!(
            count = tera.get_template_names().count(),
            glob,
            "Templates loaded"
        );
        Ok(Self { tera })
    }

    /// Build from in-memory `(name, source)` pairs
    pub fn from_raw<'a>(
        templates: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        Ok(Self { tera })
    }

    /// Render `template` into an HTML body
    pub fn render(&self, template: &str, context: &Context) -> AppResult<Html<String>> {
        self.tera
            .render(template, context)
            .map(Html)
            .map_err(|e| {
                AppError::internal(format!("Failed to render {}", template)).with_source(e)
            })
    }
}

/// Render a page for a handler, turning failures into an error page
pub fn render_page(
    views: &Arc<Views>,
    template: &str,
    context: &Context,
) -> Result<Html<String>, PageError> {
    views
        .render(template, context)
        .map_err(|e| PageError::new(views.clone(), e))
}

/// An [`AppError`] rendered as an HTML page
pub struct PageError {
    views: Arc<Views>,
    error: AppError,
}

impl PageError {
    pub fn new(views: Arc<Views>, error: AppError) -> Self {
        Self { views, error }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.error.is_server_error() {
            tracing::error!(error = ?self.error, "Request failed");
        }

        let mut context = Context::new();
        context.insert("status", &status.as_u16());
        context.insert("title", status.canonical_reason().unwrap_or("Error"));
        context.insert("message", self.error.message());
        context.insert("action", &self.error.action());

        match self.views.render(ERROR_TEMPLATE, &context) {
            Ok(page) => (status, page).into_response(),
            Err(render_err) => {
                tracing::error!(error = ?render_err, "Error page could not be rendered");
                (status, self.error.message().to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    fn views() -> Arc<Views> {
        Arc::new(
            Views::from_raw([
                ("hello.html", "Hello {{ name }}"),
                (ERROR_TEMPLATE, "<h1>{{ status }}</h1><p>{{ message }}</p>"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_render() {
        let mut ctx = Context::new();
        ctx.insert("name", "reader");
        let Html(body) = views().render("hello.html", &ctx).unwrap();
        assert_eq!(body, "Hello reader");
    }

    #[test]
    fn test_render_missing_template_is_internal() {
        let err = views().render("missing.html", &Context::new()).unwrap_err();
        assert!(err.is_server_error());

        let page_err = render_page(&views(), "missing.html", &Context::new()).unwrap_err();
        assert_eq!(
            page_err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_page_error_uses_template() {
        let response = PageError::new(views(), AppError::not_found("Post not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("<h1>404</h1>"));
        assert!(body.contains("Post not found"));
    }

    #[tokio::test]
    async fn test_page_error_falls_back_to_text() {
        let bare = Arc::new(Views::from_raw([("hello.html", "hi")]).unwrap());

        let response = PageError::new(bare, AppError::bad_request("Invalid link")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Invalid link");
    }
}
