//! Register Use Case
//!
//! Creates an unverified user and mails a verification link.

use std::sync::Arc;

use platform::mail::{Mailer, OutgoingMail};

use crate::application::config::{AuthConfig, MailFailurePolicy};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Subject line of the verification mail
pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> RegisterUseCase<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let username =
            UserName::new(&input.username).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::register(username, email, password);

        // A concurrent registration can still win the race; the unique
        // index turns that into EmailTaken.
        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User registered, sending verification mail");

        if let Err(e) = self.mailer.send(&self.verification_mail(&user)).await {
            self.compensate(&user).await;
            return Err(AuthError::Mail(e));
        }

        Ok(user)
    }

    fn verification_mail(&self, user: &User) -> OutgoingMail {
        let token = user
            .verification_token
            .as_ref()
            .map(|t| t.as_str())
            .unwrap_or_default();
        let link = self.config.verification_link(token, &user.user_id);

        OutgoingMail::new(
            user.email.as_str(),
            VERIFICATION_SUBJECT,
            format!(
                "Hello {},\n\nPlease verify your email address by opening this link:\n\n{}\n",
                user.username, link
            ),
        )
    }

    async fn compensate(&self, user: &User) {
        match self.config.mail_failure_policy {
            MailFailurePolicy::RemoveUser => {
                if let Err(e) = self.repo.delete(&user.user_id).await {
                    tracing::error!(
                        user_id = %user.user_id,
                        error = %e,
                        "Failed to remove user after mail failure"
                    );
                } else {
                    tracing::warn!(user_id = %user.user_id, "Removed user after mail failure");
                }
            }
            MailFailurePolicy::KeepUser => {
                tracing::warn!(
                    user_id = %user.user_id,
                    "Verification mail failed; unverified user kept"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::VerificationStatus;
    use crate::infra::memory::MemoryUserRepository;
    use platform::mail::OutboxMailer;

    fn input(email: &str) -> RegisterInput {
        RegisterInput {
            username: "alice".to_string(),
            email: email.to_string(),
            password: "p".to_string(),
        }
    }

    fn use_case(
        repo: &MemoryUserRepository,
        mailer: OutboxMailer,
        config: AuthConfig,
    ) -> RegisterUseCase<MemoryUserRepository, OutboxMailer> {
        RegisterUseCase::new(Arc::new(repo.clone()), Arc::new(mailer), Arc::new(config))
    }

    #[tokio::test]
    async fn test_register_creates_unverified_user_and_mails_link() {
        let repo = MemoryUserRepository::new();
        let outbox = OutboxMailer::new();
        let config = AuthConfig::development();
        let base = config.public_base_url.clone();

        let user = use_case(&repo, outbox.clone(), config)
            .execute(input("a@x.io"))
            .await
            .unwrap();

        assert_eq!(user.status(), VerificationStatus::Unverified);
        let token = user.verification_token.clone().unwrap();
        assert!(!token.as_str().is_empty());

        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(!stored.is_verified());

        let sent = outbox.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@x.io");
        let link = format!(
            "{}/verify-email?token={}&userId={}",
            base,
            token.as_str(),
            user.user_id
        );
        assert!(sent[0].text.contains(&link));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = MemoryUserRepository::new();
        let uc = use_case(&repo, OutboxMailer::new(), AuthConfig::development());

        uc.execute(input("a@x.io")).await.unwrap();
        let err = uc.execute(input("A@X.io")).await.unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_fields_are_validation_errors() {
        let repo = MemoryUserRepository::new();
        let uc = use_case(&repo, OutboxMailer::new(), AuthConfig::development());

        for bad in [
            RegisterInput {
                username: " ".to_string(),
                ..input("a@x.io")
            },
            RegisterInput {
                password: String::new(),
                ..input("a@x.io")
            },
            input(""),
            input("not-an-email"),
        ] {
            let err = uc.execute(bad).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)), "got {err:?}");
        }
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_mail_failure_removes_user_by_default() {
        let repo = MemoryUserRepository::new();
        let uc = use_case(&repo, OutboxMailer::failing(), AuthConfig::development());

        let err = uc.execute(input("a@x.io")).await.unwrap_err();
        assert!(matches!(err, AuthError::Mail(_)));
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_mail_failure_can_keep_user() {
        let repo = MemoryUserRepository::new();
        let config = AuthConfig {
            mail_failure_policy: MailFailurePolicy::KeepUser,
            ..AuthConfig::development()
        };
        let uc = use_case(&repo, OutboxMailer::failing(), config);

        let err = uc.execute(input("a@x.io")).await.unwrap_err();
        assert!(matches!(err, AuthError::Mail(_)));
        assert_eq!(repo.len().await, 1);
    }
}
