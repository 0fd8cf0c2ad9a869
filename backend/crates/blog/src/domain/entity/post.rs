//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::PostId;

use crate::domain::value_object::{owner_ref::OwnerRef, post_content::PostContent};

/// Blog post
///
/// Owner and public flag are fixed at creation; edits only replace the
/// content and bump `updated_at`.
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub content: PostContent,
    pub owner: Option<OwnerRef>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(content: PostContent, owner: Option<OwnerRef>, is_public: bool) -> Self {
        let now = Utc::now();
        Self {
            post_id: PostId::new(),
            content,
            owner,
            is_public,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title, author and body
    pub fn edit(&mut self, content: PostContent) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: &kernel::id::UserId) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.is_user(user_id))
    }
}
