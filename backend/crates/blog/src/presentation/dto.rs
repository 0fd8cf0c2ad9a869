//! Request DTOs and template views

use serde::{Deserialize, Serialize};

use crate::application::{NewPost, PostEdit};
use crate::domain::entity::post::Post;

/// Add/edit post form
///
/// Fields default to empty so missing ones reach validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub publish: Option<String>,
}

impl From<PostForm> for NewPost {
    fn from(form: PostForm) -> Self {
        Self {
            title: form.title,
            author: form.author,
            body: form.body,
            owner: form.user_id,
            publish: form.publish,
        }
    }
}

impl From<PostForm> for PostEdit {
    fn from(form: PostForm) -> Self {
        Self {
            title: form.title,
            author: form.author,
            body: form.body,
        }
    }
}

/// Post as seen by templates
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub body: String,
    pub owner: Option<String>,
    pub is_public: bool,
    pub created_at: String,
    pub updated_at: String,
}

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.post_id.to_string(),
            title: post.content.title().to_string(),
            author: post.content.author().to_string(),
            body: post.content.body().to_string(),
            owner: post.owner.as_ref().map(ToString::to_string),
            is_public: post.is_public,
            created_at: post.created_at.format(DATE_FORMAT).to_string(),
            updated_at: post.updated_at.format(DATE_FORMAT).to_string(),
        }
    }
}

pub fn post_views(posts: &[Post]) -> Vec<PostView> {
    posts.iter().map(PostView::from).collect()
}
