//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::random_secret;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::value_object::UserId;

/// What registration does with the new user when the verification mail
/// cannot be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailFailurePolicy {
    /// Delete the user so the address can register again
    #[default]
    RemoveUser,
    /// Leave the unverified user in place
    KeepUser,
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session lifetime; `None` keeps tokens valid until the secret rotates
    pub session_ttl: Option<Duration>,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Scheme, host and port used to build verification links
    pub public_base_url: String,
    pub mail_failure_policy: MailFailurePolicy,
    /// Login page; logout lands here
    pub login_path: String,
    /// Where rejected logins and sessions are redirected
    pub unauthorized_path: String,
    /// Where successful logins are redirected
    pub dashboard_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "token".to_string(),
            session_secret: [0u8; 32],
            session_ttl: None,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            public_base_url: "http://localhost:5000".to_string(),
            mail_failure_policy: MailFailurePolicy::default(),
            login_path: "/admin".to_string(),
            unauthorized_path: "/admin/unauth".to_string(),
            dashboard_path: "/admin/dashboard".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session TTL in milliseconds, if one is configured
    pub fn session_ttl_ms(&self) -> Option<i64> {
        self.session_ttl
            .map(|ttl| i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Attributes of the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: self.session_ttl.map(|ttl| ttl.as_secs()),
        }
    }

    /// Link mailed to a newly registered user
    pub fn verification_link(&self, token: &str, user_id: &UserId) -> String {
        format!(
            "{}/verify-email?token={}&userId={}",
            self.public_base_url.trim_end_matches('/'),
            token,
            user_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "token");
        assert!(config.session_ttl.is_none());
        assert!(config.session_ttl_ms().is_none());
        assert_eq!(config.mail_failure_policy, MailFailurePolicy::RemoveUser);
        assert_eq!(config.unauthorized_path, "/admin/unauth");
    }

    #[test]
    fn test_development_has_random_secret() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert!(!a.cookie_secure);
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_session_cookie_follows_ttl() {
        let mut config = AuthConfig::development();
        assert_eq!(config.session_cookie().max_age_secs, None);

        config.session_ttl = Some(Duration::from_secs(3600));
        assert_eq!(config.session_cookie().max_age_secs, Some(3600));
        assert_eq!(config.session_ttl_ms(), Some(3_600_000));
    }

    #[test]
    fn test_verification_link() {
        let config = AuthConfig {
            public_base_url: "https://blog.example.com/".to_string(),
            ..AuthConfig::default()
        };
        let user_id = UserId::new();
        assert_eq!(
            config.verification_link("abc", &user_id),
            format!("https://blog.example.com/verify-email?token=abc&userId={}", user_id)
        );
    }
}
