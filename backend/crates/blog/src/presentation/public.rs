//! Public Handlers
//!
//! Unauthenticated pages. Every operation runs as
//! [`AuthorizationContext::Anonymous`].

use axum::extract::{Path, State};
use axum::response::{Html, Redirect, Response};
use axum::Form;
use platform::view::Context;

use crate::application::AuthorizationContext;
use crate::domain::repository::PostRepository;
use crate::presentation::dto::{PostForm, post_views};
use crate::presentation::handlers::BlogAppState;

const ANONYMOUS: AuthorizationContext = AuthorizationContext::Anonymous;

/// GET /
pub async fn index<R>(State(state): State<BlogAppState<R>>) -> Result<Html<String>, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    let posts = state
        .service
        .list(&ANONYMOUS)
        .await
        .map_err(|e| e.into_page(&state.views))?;

    let mut context = Context::new();
    context.insert("posts", &post_views(&posts));
    state.page("index.html", &context)
}

/// GET /post/{id}
pub async fn post<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> Result<Html<String>, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    let post = state
        .service
        .get(&ANONYMOUS, &id)
        .await
        .map_err(|e| e.into_page(&state.views))?;

    state.post_page("post.html", &post)
}

/// GET /about
pub async fn about<R>(State(state): State<BlogAppState<R>>) -> Result<Html<String>, Response>
where
    R: PostRepository,
{
    state.page("about.html", &Context::new())
}

/// GET /feedback
pub async fn feedback<R>(State(state): State<BlogAppState<R>>) -> Result<Html<String>, Response>
where
    R: PostRepository,
{
    state.page("feedback.html", &Context::new())
}

/// GET /add-post
pub async fn add_post_page<R>(
    State(state): State<BlogAppState<R>>,
) -> Result<Html<String>, Response>
where
    R: PostRepository,
{
    state.page("add-post.html", &Context::new())
}

/// POST /add-post
pub async fn add_post<R>(
    State(state): State<BlogAppState<R>>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    state
        .service
        .create(&ANONYMOUS, form.into())
        .await
        .map_err(|e| e.into_page(&state.views))?;

    Ok(Redirect::to("/"))
}

/// GET /edit-post/{id}
pub async fn edit_post_page<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> Result<Html<String>, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    let post = state
        .service
        .get(&ANONYMOUS, &id)
        .await
        .map_err(|e| e.into_page(&state.views))?;

    state.post_page("edit-post.html", &post)
}

/// PUT /edit-post/{id}
pub async fn edit_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    let post = state
        .service
        .update(&ANONYMOUS, &id, form.into())
        .await
        .map_err(|e| e.into_page(&state.views))?;

    Ok(Redirect::to(&format!("/post/{}", post.post_id)))
}

/// DELETE /delete-post/{id}
pub async fn delete_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(id): Path<String>,
) -> Result<Redirect, Response>
where
    R: PostRepository + Send + Sync + 'static,
{
    state
        .service
        .delete(&ANONYMOUS, &id)
        .await
        .map_err(|e| e.into_page(&state.views))?;

    Ok(Redirect::to("/"))
}
