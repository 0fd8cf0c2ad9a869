//! HTTP Handlers

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use platform::mail::Mailer;
use platform::view::{Context, PageError, Views, render_page};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, VerifyEmailInput,
    VerifyEmailUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginForm, RegisteredUser, RegisterForm, RegisterResponse, VerifyEmailQuery,
};
use crate::presentation::middleware::AuthMiddlewareState;

/// Shared state for auth handlers
pub struct AuthAppState<R, M> {
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
    pub views: Arc<Views>,
}

impl<R, M> Clone for AuthAppState<R, M> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
            views: self.views.clone(),
        }
    }
}

impl<R, M> AuthAppState<R, M> {
    pub fn new(repo: R, mailer: M, config: AuthConfig, views: Arc<Views>) -> Self {
        Self {
            repo: Arc::new(repo),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
            views,
        }
    }

    /// State for `require_verified_user`, sharing this state's repository
    pub fn middleware_state(&self) -> AuthMiddlewareState<R> {
        AuthMiddlewareState {
            repo: self.repo.clone(),
            config: self.config.clone(),
            views: self.views.clone(),
        }
    }
}

/// Turn a failure on an HTML route into a terminal response
///
/// Credential and session failures redirect to the unauthorized page;
/// everything else renders the error page.
pub(crate) fn html_failure(views: &Arc<Views>, config: &AuthConfig, err: AuthError) -> Response {
    err.log();
    if err.is_unauthorized() {
        return Redirect::to(&config.unauthorized_path).into_response();
    }
    PageError::new(views.clone(), err.to_app_error()).into_response()
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Form(form): Form<RegisterForm>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let user = use_case
        .execute(RegisterInput {
            username: form.username,
            email: form.email,
            password: form.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User Created",
            user: RegisteredUser::from(&user),
        }),
    ))
}

// ============================================================================
// Verify Email
// ============================================================================

/// GET /verify-email?token=..&userId=..
pub async fn verify_email<R, M>(
    State(state): State<AuthAppState<R, M>>,
    query: Result<Query<VerifyEmailQuery>, QueryRejection>,
) -> Result<Html<String>, Response>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unreadable verification query");
        html_failure(&state.views, &state.config, AuthError::InvalidLink)
    })?;

    let use_case = VerifyEmailUseCase::new(state.repo.clone());

    let user = use_case
        .execute(VerifyEmailInput {
            token: query.token,
            user_id: query.user_id,
        })
        .await
        .map_err(|e| html_failure(&state.views, &state.config, e))?;

    let mut context = Context::new();
    context.insert("username", user.username.as_str());
    context.insert("login_path", &state.config.login_path);

    render_page(&state.views, "verified.html", &context).map_err(IntoResponse::into_response)
}

// ============================================================================
// Login / Logout
// ============================================================================

/// GET /admin
pub async fn login_page<R, M>(
    State(state): State<AuthAppState<R, M>>,
) -> Result<Html<String>, PageError> {
    render_page(&state.views, "admin/index.html", &Context::new())
}

/// POST /admin
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, Response>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            username: form.username,
            password: form.password,
        })
        .await
        .map_err(|e| html_failure(&state.views, &state.config, e))?;

    let cookie = state
        .config
        .session_cookie()
        .set_header(&output.session_token)
        .map_err(|e| {
            html_failure(
                &state.views,
                &state.config,
                AuthError::Internal(format!("Invalid session cookie: {e}")),
            )
        })?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&state.config.dashboard_path),
    )
        .into_response())
}

/// GET /admin/unauth
pub async fn unauthorized_page<R, M>(
    State(state): State<AuthAppState<R, M>>,
) -> Result<Html<String>, PageError> {
    let mut context = Context::new();
    context.insert("login_path", &state.config.login_path);
    render_page(&state.views, "admin/unauth.html", &context)
}

/// GET /admin/logout
pub async fn logout<R, M>(State(state): State<AuthAppState<R, M>>) -> Response {
    let redirect = Redirect::to(&state.config.login_path);

    match state.config.session_cookie().delete_header() {
        Ok(cookie) => ([(header::SET_COOKIE, cookie)], redirect).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Could not build cookie removal header");
            redirect.into_response()
        }
    }
}
