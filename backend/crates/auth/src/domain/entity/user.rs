//! User Entity
//!
//! Registered account. Starts unverified with a pending verification token;
//! a matching token moves it to verified, which is terminal.

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::Serialize;

use crate::domain::value_object::{
    UserId, email::Email, user_name::UserName, user_password::UserPassword,
    verification_token::VerificationToken,
};

/// Email verification state, derived from the stored flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum VerificationStatus {
    #[display("unverified")]
    Unverified,
    #[display("verified")]
    Verified,
}

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub username: UserName,
    pub email: Email,
    pub password: UserPassword,
    /// Present only while verification is pending
    pub verification_token: Option<VerificationToken>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New unverified user with a fresh verification token
    pub fn register(username: UserName, email: Email, password: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            username,
            email,
            password,
            verification_token: Some(VerificationToken::generate()),
            is_verified: false,
            created_at: Utc::now(),
        }
    }

    pub fn status(&self) -> VerificationStatus {
        if self.is_verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Unverified
        }
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Apply a verification token taken from a link
    ///
    /// Returns `false` (leaving the user untouched) when no token is pending
    /// or the candidate does not match.
    pub fn verify(&mut self, candidate: &str) -> bool {
        let matches = self
            .verification_token
            .as_ref()
            .is_some_and(|token| token.matches(candidate));

        if matches {
            self.is_verified = true;
            self.verification_token = None;
        }
        matches
    }
}
