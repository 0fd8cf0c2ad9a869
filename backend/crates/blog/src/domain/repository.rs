//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::post::Post;
use crate::domain::value_object::{PostId, owner_ref::OwnerRef};
use crate::error::BlogResult;

/// Post repository trait
///
/// Listings are ordered by creation time, oldest first.
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Insert a new post
    async fn create(&self, post: &Post) -> BlogResult<()>;

    /// Find post by ID
    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>>;

    /// Every post
    async fn list_all(&self) -> BlogResult<Vec<Post>>;

    /// Posts flagged public
    async fn list_public(&self) -> BlogResult<Vec<Post>>;

    /// Posts whose owner reference equals `owner`
    async fn list_by_owner(&self, owner: &OwnerRef) -> BlogResult<Vec<Post>>;

    /// Persist title, author, body and `updated_at`
    ///
    /// Returns `false` if the post no longer exists.
    async fn update_content(&self, post: &Post) -> BlogResult<bool>;

    /// Remove a post (no-op when absent)
    async fn delete(&self, post_id: &PostId) -> BlogResult<()>;
}
