//! Check Session Use Case
//!
//! Resolves a session cookie to a verified user.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionToken;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Identity attached to requests that passed the session check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CheckSessionUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// One store lookup per call. Store failures propagate as-is; every
    /// other rejection is `SessionInvalid`.
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let token = session_token.ok_or(AuthError::SessionInvalid)?;
        let session =
            SessionToken::verify(token, &self.config, Utc::now().timestamp_millis())?;

        let user = self
            .repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if !user.is_verified() {
            return Err(AuthError::SessionInvalid);
        }

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            username: user.username.into(),
        })
    }
}
