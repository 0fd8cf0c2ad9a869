//! Signed Session Token
//!
//! Stateless token carried in the session cookie:
//! `{user_id}.{issued_at_ms}.{base64url(HMAC-SHA256(secret, "{user_id}.{issued_at_ms}"))}`

use platform::crypto::{from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken {
    pub user_id: UserId,
    pub issued_at_ms: i64,
}

impl SessionToken {
    pub fn new(user_id: UserId, issued_at_ms: i64) -> Self {
        Self {
            user_id,
            issued_at_ms,
        }
    }

    fn payload(&self) -> String {
        format!("{}.{}", self.user_id, self.issued_at_ms)
    }

    /// Serialize and sign
    pub fn sign(&self, secret: &[u8]) -> String {
        let payload = self.payload();
        let signature = hmac_sha256(secret, payload.as_bytes());
        format!("{}.{}", payload, to_base64_url(&signature))
    }

    /// Parse a cookie value, check its signature and (when configured) its age
    ///
    /// Every failure is reported as `SessionInvalid`.
    pub fn verify(token: &str, config: &AuthConfig, now_ms: i64) -> AuthResult<Self> {
        let mut parts = token.split('.');
        let (Some(user_id), Some(issued_at), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::SessionInvalid);
        };

        let signature = from_base64_url(signature).map_err(|_| AuthError::SessionInvalid)?;
        let payload = format!("{}.{}", user_id, issued_at);
        if !verify_hmac_sha256(&config.session_secret, payload.as_bytes(), &signature) {
            return Err(AuthError::SessionInvalid);
        }

        let user_id: UserId = user_id.parse().map_err(|_| AuthError::SessionInvalid)?;
        let issued_at_ms: i64 = issued_at.parse().map_err(|_| AuthError::SessionInvalid)?;

        if let Some(ttl_ms) = config.session_ttl_ms()
            && now_ms.saturating_sub(issued_at_ms) > ttl_ms
        {
            return Err(AuthError::SessionInvalid);
        }

        Ok(Self::new(user_id, issued_at_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> AuthConfig {
        AuthConfig::development()
    }

    #[test]
    fn test_sign_and_verify() {
        let config = config();
        let token = SessionToken::new(UserId::new(), 1_700_000_000_000);
        let signed = token.sign(&config.session_secret);

        assert_eq!(signed.split('.').count(), 3);
        let parsed = SessionToken::verify(&signed, &config, 1_800_000_000_000).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_rejects_malformed() {
        let config = config();
        for bad in ["", "abc", "a.b", "a.b.c.d", "not-a-uuid.1.AAAA"] {
            assert!(matches!(
                SessionToken::verify(bad, &config, 0),
                Err(AuthError::SessionInvalid)
            ));
        }
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = SessionToken::new(UserId::new(), 0).sign(&[7u8; 32]);
        assert!(SessionToken::verify(&token, &config(), 0).is_err());
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let config = config();
        let signed = SessionToken::new(UserId::new(), 0).sign(&config.session_secret);
        let signature = signed.rsplit('.').next().unwrap();
        let forged = format!("{}.0.{}", UserId::new(), signature);
        assert!(SessionToken::verify(&forged, &config, 0).is_err());
    }

    #[test]
    fn test_ttl_expiry() {
        let mut config = config();
        config.session_ttl = Some(Duration::from_secs(60));
        let signed = SessionToken::new(UserId::new(), 1_000).sign(&config.session_secret);

        assert!(SessionToken::verify(&signed, &config, 1_000 + 60_000).is_ok());
        assert!(SessionToken::verify(&signed, &config, 1_000 + 60_001).is_err());
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let config = config();
        let signed = SessionToken::new(UserId::new(), 0).sign(&config.session_secret);
        assert!(SessionToken::verify(&signed, &config, i64::MAX).is_ok());
    }
}
