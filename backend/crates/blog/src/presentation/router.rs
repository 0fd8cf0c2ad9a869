//! Blog Routers
//!
//! `admin_router` expects an [`auth::AuthenticatedUser`] request extension;
//! mount it behind `auth::middleware::require_verified_user`.

use axum::{
    Router,
    routing::{delete, get},
};

use crate::domain::repository::PostRepository;
use crate::presentation::handlers::BlogAppState;
use crate::presentation::{admin, public};

/// Public pages and anonymous post operations
pub fn public_router<R>(state: BlogAppState<R>) -> Router
where
    R: PostRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(public::index::<R>))
        .route("/post/{id}", get(public::post::<R>))
        .route("/about", get(public::about::<R>))
        .route("/feedback", get(public::feedback::<R>))
        .route(
            "/add-post",
            get(public::add_post_page::<R>).post(public::add_post::<R>),
        )
        .route(
            "/edit-post/{id}",
            get(public::edit_post_page::<R>).put(public::edit_post::<R>),
        )
        .route("/delete-post/{id}", delete(public::delete_post::<R>))
        .with_state(state)
}

/// Admin post operations acting as the authenticated user
pub fn admin_router<R>(state: BlogAppState<R>) -> Router
where
    R: PostRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/admin/dashboard", get(admin::dashboard::<R>))
        .route("/admin/post/{id}", get(admin::post::<R>))
        .route(
            "/admin/add-post",
            get(admin::add_post_page::<R>).post(admin::add_post::<R>),
        )
        .route(
            "/admin/edit-post/{id}",
            get(admin::edit_post_page::<R>).put(admin::edit_post::<R>),
        )
        .route("/admin/delete-post/{id}", delete(admin::delete_post::<R>))
        .with_state(state)
}
