//! Shared handler state and helpers

use axum::response::{Html, IntoResponse, Response};
use platform::view::{Context, Views, render_page};
use std::sync::Arc;

use crate::application::{BlogConfig, PostService};
use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::presentation::dto::PostView;

/// Shared state for blog handlers
pub struct BlogAppState<R>
where
    R: PostRepository,
{
    pub service: Arc<PostService<R>>,
    pub views: Arc<Views>,
}

impl<R> Clone for BlogAppState<R>
where
    R: PostRepository,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            views: self.views.clone(),
        }
    }
}

impl<R> BlogAppState<R>
where
    R: PostRepository,
{
    pub fn new(repo: R, config: BlogConfig, views: Arc<Views>) -> Self {
        Self {
            service: Arc::new(PostService::new(Arc::new(repo), config)),
            views,
        }
    }

    pub(crate) fn page(&self, template: &str, context: &Context) -> Result<Html<String>, Response> {
        render_page(&self.views, template, context).map_err(IntoResponse::into_response)
    }

    /// Render a template whose only variable is `post`
    pub(crate) fn post_page(&self, template: &str, post: &Post) -> Result<Html<String>, Response> {
        let mut context = Context::new();
        context.insert("post", &PostView::from(post));
        self.page(template, &context)
    }
}
