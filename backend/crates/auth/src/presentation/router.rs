//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::mail::Mailer;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Registration, verification, login and logout routes
pub fn auth_router<R, M>(state: AuthAppState<R, M>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/verify-email", get(handlers::verify_email::<R, M>))
        .route(
            "/admin",
            get(handlers::login_page::<R, M>).post(handlers::login::<R, M>),
        )
        .route("/admin/unauth", get(handlers::unauthorized_page::<R, M>))
        .route("/admin/logout", get(handlers::logout::<R, M>))
        .with_state(state)
}
