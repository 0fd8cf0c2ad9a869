//! Auth Middleware
//!
//! Middleware for requiring a verified user on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;
use platform::view::Views;
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::html_failure;

/// Middleware state
pub struct AuthMiddlewareState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub views: Arc<Views>,
}

impl<R> Clone for AuthMiddlewareState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            views: self.views.clone(),
        }
    }
}

/// Middleware that requires a session cookie belonging to a verified user
///
/// On success the request carries an
/// [`AuthenticatedUser`](crate::application::AuthenticatedUser) extension.
/// Rejected sessions are redirected to the unauthorized page; store
/// failures render a 500 page.
///
/// Use with `axum::middleware::from_fn_with_state(state, require_verified_user::<R>)`.
pub async fn require_verified_user<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.execute(token.as_deref()).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.user_id, "Session accepted");
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => html_failure(&state.views, &state.config, e),
    }
}
