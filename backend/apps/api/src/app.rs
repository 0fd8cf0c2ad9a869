//! Application Router
//!
//! Assembles the auth and blog routers, the admin guard, static files and
//! the 404 page into one service.

use std::path::PathBuf;
use std::sync::Arc;

use auth::auth_router;
use auth::config::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::handlers::AuthAppState;
use auth::middleware::require_verified_user;
use axum::extract::Request;
use axum::response::IntoResponse;
use axum::{Router, middleware};
use blog::domain::repository::PostRepository;
use blog::{BlogAppState, BlogConfig, admin_router, public_router};
use kernel::error::app_error::AppError;
use platform::mail::Mailer;
use platform::view::{PageError, Views};
use tower::Layer;
use tower::util::{MapRequest, MapRequestLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::method_override::method_override;

/// The complete HTTP service
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Stores, mailer, settings and views the router is built from
pub struct AppParts<U, P, M> {
    pub users: U,
    pub posts: P,
    pub mailer: M,
    pub auth: AuthConfig,
    pub blog: BlogConfig,
    pub views: Arc<Views>,
    pub static_dir: PathBuf,
}

pub fn build_app<U, P, M>(parts: AppParts<U, P, M>) -> App
where
    U: UserRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let auth_state = AuthAppState::new(parts.users, parts.mailer, parts.auth, parts.views.clone());
    let blog_state = BlogAppState::new(parts.posts, parts.blog, parts.views.clone());

    let admin = admin_router(blog_state.clone()).route_layer(middleware::from_fn_with_state(
        auth_state.middleware_state(),
        require_verified_user::<U>,
    ));

    let views = parts.views;
    let router = Router::new()
        .merge(public_router(blog_state))
        .merge(auth_router(auth_state))
        .merge(admin)
        .nest_service("/static", ServeDir::new(parts.static_dir))
        .fallback(move || {
            let views = views.clone();
            async move {
                PageError::new(views, AppError::not_found("Page not found")).into_response()
            }
        })
        .layer(TraceLayer::new_for_http());

    MapRequestLayer::new(method_override as fn(Request) -> Request).layer(router)
}
