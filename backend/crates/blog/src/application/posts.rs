//! Post Service
//!
//! Every post operation, parameterized by who is acting. Public and admin
//! routes both call into this service.

use std::sync::Arc;

use crate::application::config::{BlogConfig, ListingPolicy, OwnershipPolicy};
use crate::application::context::AuthorizationContext;
use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{PostId, owner_ref::OwnerRef, post_content::PostContent};
use crate::error::{BlogError, BlogResult};

/// Fields submitted when creating a post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub body: String,
    /// Owner claimed by the form; ignored for authenticated callers
    pub owner: Option<String>,
    /// Raw `publish` checkbox value; ignored for anonymous callers
    pub publish: Option<String>,
}

/// Fields submitted when editing a post
#[derive(Debug, Clone, Default)]
pub struct PostEdit {
    pub title: String,
    pub author: String,
    pub body: String,
}

/// Checkbox values that mean "publish"
fn is_checked(value: Option<&str>) -> bool {
    matches!(value, Some("true" | "on"))
}

/// Ids that do not parse cannot name a stored post
fn parse_post_id(raw: &str) -> Option<PostId> {
    raw.parse().ok()
}

pub struct PostService<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
    config: BlogConfig,
}

impl<R> PostService<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>, config: BlogConfig) -> Self {
        Self { repo, config }
    }

    fn authorize(&self, ctx: &AuthorizationContext, post: &Post) -> BlogResult<()> {
        match (self.config.ownership_policy, ctx) {
            (OwnershipPolicy::OwnerOnly, AuthorizationContext::Authenticated(user_id))
                if !post.is_owned_by(user_id) =>
            {
                Err(BlogError::NotOwner)
            }
            _ => Ok(()),
        }
    }

    /// Anonymous: all posts (or public ones). Authenticated: the caller's posts.
    pub async fn list(&self, ctx: &AuthorizationContext) -> BlogResult<Vec<Post>> {
        match ctx {
            AuthorizationContext::Anonymous => match self.config.listing_policy {
                ListingPolicy::All => self.repo.list_all().await,
                ListingPolicy::PublicOnly => self.repo.list_public().await,
            },
            AuthorizationContext::Authenticated(user_id) => {
                self.repo.list_by_owner(&OwnerRef::from_user(user_id)).await
            }
        }
    }

    pub async fn get(&self, ctx: &AuthorizationContext, post_id: &str) -> BlogResult<Post> {
        let post_id = parse_post_id(post_id).ok_or(BlogError::PostNotFound)?;
        let post = self
            .repo
            .find_by_id(&post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        self.authorize(ctx, &post)?;
        Ok(post)
    }

    pub async fn create(&self, ctx: &AuthorizationContext, input: NewPost) -> BlogResult<Post> {
        let content = PostContent::new(input.title, input.author, input.body)?;

        let post = match ctx {
            AuthorizationContext::Anonymous => {
                Post::new(content, OwnerRef::from_raw(input.owner), false)
            }
            AuthorizationContext::Authenticated(user_id) => Post::new(
                content,
                Some(OwnerRef::from_user(user_id)),
                is_checked(input.publish.as_deref()),
            ),
        };

        self.repo.create(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            owner = ?post.owner.as_ref().map(OwnerRef::as_str),
            is_public = post.is_public,
            "Post created"
        );

        Ok(post)
    }

    pub async fn update(
        &self,
        ctx: &AuthorizationContext,
        post_id: &str,
        edit: PostEdit,
    ) -> BlogResult<Post> {
        let post_id = parse_post_id(post_id).ok_or(BlogError::PostNotFound)?;
        let content = PostContent::new(edit.title, edit.author, edit.body)?;

        let mut post = self
            .repo
            .find_by_id(&post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;
        self.authorize(ctx, &post)?;

        post.edit(content);

        if !self.repo.update_content(&post).await? {
            return Err(BlogError::PostNotFound);
        }

        tracing::info!(post_id = %post.post_id, "Post updated");
        Ok(post)
    }

    /// Deleting a post that does not exist succeeds.
    pub async fn delete(&self, ctx: &AuthorizationContext, post_id: &str) -> BlogResult<()> {
        let Some(post_id) = parse_post_id(post_id) else {
            tracing::debug!(post_id, "Delete of unparsable post id ignored");
            return Ok(());
        };

        if self.config.ownership_policy == OwnershipPolicy::OwnerOnly
            && let Some(post) = self.repo.find_by_id(&post_id).await?
        {
            self.authorize(ctx, &post)?;
        }

        self.repo.delete(&post_id).await?;

        tracing::info!(post_id = %post_id, "Post deleted");
        Ok(())
    }
}
