//! Verify Email Use Case
//!
//! Consumes the token from a verification link.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Query parameters of the verification link, as received
pub struct VerifyEmailInput {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

pub struct VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every rejection, whatever the cause, is `InvalidLink`.
    pub async fn execute(&self, input: VerifyEmailInput) -> AuthResult<User> {
        let (Some(token), Some(user_id)) = (input.token, input.user_id) else {
            return Err(AuthError::InvalidLink);
        };
        let user_id: UserId = user_id.parse().map_err(|_| AuthError::InvalidLink)?;

        let mut user = self
            .repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidLink)?;

        if !user.verify(&token) {
            return Err(AuthError::InvalidLink);
        }

        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Email verified");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email,
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use crate::infra::memory::MemoryUserRepository;

    async fn seeded(email: &str) -> (MemoryUserRepository, User) {
        let repo = MemoryUserRepository::new();
        let raw = RawPassword::new("p".to_string()).unwrap();
        let user = User::register(
            UserName::new("alice").unwrap(),
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        );
        repo.create(&user).await.unwrap();
        (repo, user)
    }

    fn link(user: &User, token: &str) -> VerifyEmailInput {
        VerifyEmailInput {
            token: Some(token.to_string()),
            user_id: Some(user.user_id.to_string()),
        }
    }

    #[tokio::test]
    async fn test_verify_marks_only_that_user() {
        let (repo, user) = seeded("a@x.io").await;
        let other = User::register(
            UserName::new("bob").unwrap(),
            Email::new("b@x.io").unwrap(),
            user.password.clone(),
        );
        repo.create(&other).await.unwrap();

        let uc = VerifyEmailUseCase::new(Arc::new(repo.clone()));
        let token = user.verification_token.clone().unwrap();
        uc.execute(link(&user, token.as_str())).await.unwrap();

        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(stored.is_verified());
        assert!(stored.verification_token.is_none());

        let untouched = repo.find_by_id(&other.user_id).await.unwrap().unwrap();
        assert!(!untouched.is_verified());
    }

    #[tokio::test]
    async fn test_replay_is_invalid_link() {
        let (repo, user) = seeded("a@x.io").await;
        let uc = VerifyEmailUseCase::new(Arc::new(repo));
        let token = user.verification_token.clone().unwrap();

        uc.execute(link(&user, token.as_str())).await.unwrap();
        let err = uc.execute(link(&user, token.as_str())).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidLink));
    }

    #[tokio::test]
    async fn test_bad_links_are_rejected() {
        let (repo, user) = seeded("a@x.io").await;
        let uc = VerifyEmailUseCase::new(Arc::new(repo.clone()));

        let cases = [
            link(&user, "wrong"),
            VerifyEmailInput {
                token: None,
                user_id: Some(user.user_id.to_string()),
            },
            VerifyEmailInput {
                token: Some("t".to_string()),
                user_id: None,
            },
            VerifyEmailInput {
                token: Some("t".to_string()),
                user_id: Some("not-a-uuid".to_string()),
            },
            VerifyEmailInput {
                token: Some("t".to_string()),
                user_id: Some(UserId::new().to_string()),
            },
        ];

        for input in cases {
            let err = uc.execute(input).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidLink));
        }

        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(!stored.is_verified());
    }
}
