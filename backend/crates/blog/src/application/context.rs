//! Authorization Context
//!
//! Who is acting on a post. Public routes act anonymously; admin routes act
//! as the user the session middleware resolved.

use auth::AuthenticatedUser;
use kernel::id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationContext {
    Anonymous,
    Authenticated(UserId),
}

impl From<&AuthenticatedUser> for AuthorizationContext {
    fn from(user: &AuthenticatedUser) -> Self {
        AuthorizationContext::Authenticated(user.user_id)
    }
}
