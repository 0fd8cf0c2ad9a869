//! In-memory Repository Implementation
//!
//! Posts are kept in insertion order, which is also creation order.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{PostId, owner_ref::OwnerRef};
use crate::error::BlogResult;

#[derive(Clone, Default)]
pub struct MemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    async fn filtered(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let posts = self.posts.read().await;
        posts.iter().filter(|p| keep(p)).cloned().collect()
    }
}

impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: &Post) -> BlogResult<()> {
        self.posts.write().await.push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.post_id == *post_id).cloned())
    }

    async fn list_all(&self) -> BlogResult<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn list_public(&self) -> BlogResult<Vec<Post>> {
        Ok(self.filtered(|p| p.is_public).await)
    }

    async fn list_by_owner(&self, owner: &OwnerRef) -> BlogResult<Vec<Post>> {
        Ok(self.filtered(|p| p.owner.as_ref() == Some(owner)).await)
    }

    async fn update_content(&self, post: &Post) -> BlogResult<bool> {
        let mut posts = self.posts.write().await;
        let Some(stored) = posts.iter_mut().find(|p| p.post_id == post.post_id) else {
            return Ok(false);
        };
        stored.content = post.content.clone();
        stored.updated_at = post.updated_at;
        Ok(true)
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<()> {
        self.posts.write().await.retain(|p| p.post_id != *post_id);
        Ok(())
    }
}
