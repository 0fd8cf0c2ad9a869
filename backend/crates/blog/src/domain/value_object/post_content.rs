//! Post Content Value Object
//!
//! Title, author and body of a post. All three are required.

use crate::error::{BlogError, BlogResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    title: String,
    author: String,
    body: String,
}

impl PostContent {
    pub fn new(title: String, author: String, body: String) -> BlogResult<Self> {
        for (field, value) in [("Title", &title), ("Author", &author), ("Body", &body)] {
            if value.trim().is_empty() {
                return Err(BlogError::Validation(format!("{field} is required")));
            }
        }

        Ok(Self {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            body,
        })
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(title: String, author: String, body: String) -> Self {
        Self {
            title,
            author,
            body,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
