//! Post Owner Reference
//!
//! Weak reference to the user who owns a post, stored as raw text. Posts
//! created through the admin panel always carry a real user id; the public
//! form stores whatever `userId` value it was given.

use kernel::id::UserId;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OwnerRef(String);

impl OwnerRef {
    pub fn from_user(user_id: &UserId) -> Self {
        Self(user_id.to_string())
    }

    /// Keep a caller-supplied value verbatim, including an empty one
    pub fn from_raw(raw: Option<String>) -> Option<Self> {
        raw.map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The referenced user, when the value is a well-formed id
    pub fn user_id(&self) -> Option<UserId> {
        self.0.parse().ok()
    }

    pub fn is_user(&self, user_id: &UserId) -> bool {
        self.user_id().as_ref() == Some(user_id)
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user() {
        let user_id = UserId::new();
        let owner = OwnerRef::from_user(&user_id);
        assert!(owner.is_user(&user_id));
        assert!(!owner.is_user(&UserId::new()));
    }

    #[test]
    fn test_raw_values_are_kept_verbatim() {
        let owner = OwnerRef::from_raw(Some("  not an id ".to_string())).unwrap();
        assert_eq!(owner.as_str(), "  not an id ");
        assert!(owner.user_id().is_none());

        assert!(OwnerRef::from_raw(None).is_none());
        let empty = OwnerRef::from_raw(Some(String::new())).unwrap();
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    fn test_raw_uuid_matches_user() {
        let user_id = UserId::new();
        let owner = OwnerRef::from_raw(Some(user_id.to_string())).unwrap();
        assert!(owner.is_user(&user_id));
    }
}
