//! Admin Handlers
//!
//! Routes behind the session middleware. Each handler acts as the
//! [`AuthenticatedUser`] the middleware attached to the request.

use auth::AuthenticatedUser;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect, Response};
use axum::{Extension, Form};
use platform::view::Context;

use crate::application::AuthorizationContext;
use crate::domain::repository::PostRepository;
use crate::presentation::dto::{PostForm, post_views};
use crate::presentation::handlers::BlogAppState;

/// GET /admin/dashboard
pub async fn dashboard<R>(
    State(state): State<BlogAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Html<String>, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    let posts = state
        .service
        .list(&AuthorizationContext::from(&user))
        .await
        .map_err(|e| e.into_page(&state.views))?;

    let mut context = Context::new();
    context.insert("user_name", &user.username);
    context.insert("user_id", &user.user_id.to_string());
    context.insert("posts", &post_views(&posts));
    state.page("admin/dashboard.html", &context)
}

/// GET /admin/post/{id}
pub async fn post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Html<String>, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    let post = state
        .service
        .get(&AuthorizationContext::from(&user), &id)
        .await
        .map_err(|e| e.into_page(&state.views))?;

    state.post_page("admin/post.html", &post)
}

/// GET /admin/add-post
pub async fn add_post_page<R>(
    State(state): State<BlogAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Html<String>, Response>
where
    R: PostRepository,
{
    let mut context = Context::new();
    context.insert("user_id", &user.user_id.to_string());
    state.page("admin/add-post.html", &context)
}

/// POST /admin/add-post
pub async fn add_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    state
        .service
        .create(&AuthorizationContext::from(&user), form.into())
        .await
        .map_err(|e| e.into_page(&state.views))?;

    Ok(Redirect::to("/admin/dashboard"))
}

/// GET /admin/edit-post/{id}
pub async fn edit_post_page<R>(
    State(state): State<BlogAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Html<String>, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    let post = state
        .service
        .get(&AuthorizationContext::from(&user), &id)
        .await
        .map_err(|e| e.into_page(&state.views))?;

    state.post_page("admin/edit-post.html", &post)
}

/// PUT /admin/edit-post/{id}
pub async fn edit_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    let post = state
        .service
        .update(&AuthorizationContext::from(&user), &id, form.into())
        .await
        .map_err(|e| e.into_page(&state.views))?;

    Ok(Redirect::to(&format!("/admin/post/{}", post.post_id)))
}

/// DELETE /admin/delete-post/{id}
pub async fn delete_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Redirect, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    state
        .service
        .delete(&AuthorizationContext::from(&user), &id)
        .await
        .map_err(|e| e.into_page(&state.views))?;

    Ok(Redirect::to("/admin/dashboard"))
}
