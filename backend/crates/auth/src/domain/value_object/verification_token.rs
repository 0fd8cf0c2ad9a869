//! Email Verification Token
//!
//! 32 random bytes from the OS RNG, hex-encoded. Issued at registration and
//! cleared once the address is verified.

use platform::crypto::{constant_time_eq, random_hex_token};
use std::fmt;

/// Random bytes per token
pub const VERIFICATION_TOKEN_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn generate() -> Self {
        Self(random_hex_token(VERIFICATION_TOKEN_BYTES))
    }

    /// Create from database value
    pub fn from_db(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time comparison against a token taken from a link
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VerificationToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let token = VerificationToken::generate();
        assert_eq!(token.as_str().len(), VERIFICATION_TOKEN_BYTES * 2);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, VerificationToken::generate());
    }

    #[test]
    fn test_matches() {
        let token = VerificationToken::from_db("abc123");
        assert!(token.matches("abc123"));
        assert!(!token.matches("abc124"));
        assert!(!token.matches("abc12"));
        assert!(!token.matches(""));
    }
}
