//! Outbound Mail
//!
//! `Mailer` is the seam the application talks to. Three implementations:
//! - [`HttpMailer`] posts JSON to a transactional mail HTTP API
//! - [`LogMailer`] only logs the message (local development)
//! - [`OutboxMailer`] keeps sent messages in memory (tests)

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

/// A single plain-text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl OutgoingMail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Mail API rejected the message (status {0})")]
    Rejected(u16),

    #[error("Mail delivery is disabled")]
    Disabled,
}

/// Mail delivery trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver one message
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

// ============================================================================
// HTTP API mailer
// ============================================================================

/// Settings for [`HttpMailer`]
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    /// Full endpoint URL, e.g. `https://mail.example.com/v1/send`
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address placed in the `from` field
    pub from: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mailer backed by a transactional mail HTTP API
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    config: Arc<HttpMailerConfig>,
}

impl HttpMailer {
    pub fn new(config: HttpMailerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let body = SendRequest {
            from: &self.config.from,
            to: &mail.to,
            subject: &mail.subject,
            text: &mail.text,
        };

        let mut request = self.client.post(&self.config.api_url).json(&body);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Rejected(response.status().as_u16()));
        }

        tracing::debug!(to = %mail.to, subject = %mail.subject, "Mail accepted by API");
        Ok(())
    }
}

// ============================================================================
// Logging mailer
// ============================================================================

/// Writes messages to the log instead of delivering them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.text,
            "Mail delivery not configured; logging message instead"
        );
        Ok(())
    }
}

// ============================================================================
// In-memory outbox
// ============================================================================

/// Records every message; can be switched to fail every send
#[derive(Debug, Clone, Default)]
pub struct OutboxMailer {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    failing: bool,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// An outbox whose every send fails with [`MailError::Disabled`]
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            failing: true,
        }
    }

    /// Snapshot of the messages sent so far
    pub async fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().await.clone()
    }
}

impl Mailer for OutboxMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        if self.failing {
            return Err(MailError::Disabled);
        }
        self.sent.lock().await.push(mail.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LogMailer, MailError, Mailer, OutboxMailer, OutgoingMail, SendRequest};

    #[tokio::test]
    async fn test_outbox_records_messages() {
        let outbox = OutboxMailer::new();
        let clone = outbox.clone();

        clone
            .send(&OutgoingMail::new("a@example.com", "Hello", "Body"))
            .await
            .unwrap();

        let sent = outbox.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@example.com");
        assert_eq!(sent[0].subject, "Hello");
    }

    #[tokio::test]
    async fn test_failing_outbox() {
        let outbox = OutboxMailer::failing();
        let result = outbox
            .send(&OutgoingMail::new("a@example.com", "Hello", "Body"))
            .await;
        assert!(matches!(result, Err(MailError::Disabled)));
        assert!(outbox.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let result = LogMailer
            .send(&OutgoingMail::new("a@example.com", "Hi", "Text"))
            .await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_send_request_shape() {
        let body = SendRequest {
            from: "blog@example.com",
            to: "a@example.com",
            subject: "Verify",
            text: "link",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["from"], "blog@example.com");
        assert_eq!(json["to"], "a@example.com");
        assert_eq!(json["subject"], "Verify");
    }
}
