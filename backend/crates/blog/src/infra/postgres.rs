//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{PostId, owner_ref::OwnerRef, post_content::PostContent};
use crate::error::BlogResult;

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_list(&self, filter: &str, owner: Option<&OwnerRef>) -> BlogResult<Vec<Post>> {
        let sql = format!("{SELECT_POST} {filter} ORDER BY created_at, post_id");
        let mut query = sqlx::query_as::<_, PostRow>(&sql);
        if let Some(owner) = owner {
            query = query.bind(owner.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }
}

const SELECT_POST: &str = r#"
    SELECT
        post_id,
        title,
        author,
        body,
        owner,
        is_public,
        created_at,
        updated_at
    FROM posts
"#;

impl PostRepository for PgPostRepository {
    async fn create(&self, post: &Post) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                author,
                body,
                owner,
                is_public,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.content.title())
        .bind(post.content.author())
        .bind(post.content.body())
        .bind(post.owner.as_ref().map(OwnerRef::as_str))
        .bind(post.is_public)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POST} WHERE post_id = $1"))
            .bind(post_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn list_all(&self) -> BlogResult<Vec<Post>> {
        self.fetch_list("", None).await
    }

    async fn list_public(&self) -> BlogResult<Vec<Post>> {
        self.fetch_list("WHERE is_public", None).await
    }

    async fn list_by_owner(&self, owner: &OwnerRef) -> BlogResult<Vec<Post>> {
        self.fetch_list("WHERE owner = $1", Some(owner)).await
    }

    async fn update_content(&self, post: &Post) -> BlogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                author = $3,
                body = $4,
                updated_at = $5
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.content.title())
        .bind(post.content.author())
        .bind(post.content.body())
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<()> {
        sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    author: String,
    body: String,
    owner: Option<String>,
    is_public: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            content: PostContent::from_db(self.title, self.author, self.body),
            owner: OwnerRef::from_raw(self.owner),
            is_public: self.is_public,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
