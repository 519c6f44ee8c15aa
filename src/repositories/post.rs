use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::entities::{Post, PostDraft};

const POST_COLUMNS: &str = "id, title, slug, excerpt, content, cover_image, author_name, \
     published, tags, reading_time_minutes, created_at, updated_at";

/// Record store for blog posts.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostRepositoryTrait {
    async fn insert(&self, draft: PostDraft) -> Result<Post>;

    /// Replace every column of post `id`. `None` when it does not exist.
    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Option<Post>>;

    async fn find_by_slug(&self, slug: &str, published_only: bool) -> Result<Option<Post>>;

    /// Newest first, optionally restricted to posts carrying `tag`.
    async fn list(&self, published_only: bool, tag: Option<String>) -> Result<Vec<Post>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct PostRepository {
    pool: Pool<Postgres>,
}

impl PostRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepositoryTrait for PostRepository {
    async fn insert(&self, draft: PostDraft) -> Result<Post> {
        let sql = format!(
            r#"
            INSERT INTO posts
                  (title, slug, excerpt, content, cover_image, author_name,
                   published, tags, reading_time_minutes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {POST_COLUMNS}
            "#
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(draft.title)
            .bind(draft.slug)
            .bind(draft.excerpt)
            .bind(draft.content)
            .bind(draft.cover_image)
            .bind(draft.author_name)
            .bind(draft.published)
            .bind(draft.tags)
            .bind(draft.reading_time_minutes)
            .fetch_one(&self.pool)
            .await?;

        Ok(post)
    }

    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Option<Post>> {
        let sql = format!(
            r#"
            UPDATE posts
            SET title = $2,
                slug = $3,
                excerpt = $4,
                content = $5,
                cover_image = $6,
                author_name = $7,
                published = $8,
                tags = $9,
                reading_time_minutes = $10,
                updated_at = now()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(draft.title)
            .bind(draft.slug)
            .bind(draft.excerpt)
            .bind(draft.content)
            .bind(draft.cover_image)
            .bind(draft.author_name)
            .bind(draft.published)
            .bind(draft.tags)
            .bind(draft.reading_time_minutes)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn find_by_slug(&self, slug: &str, published_only: bool) -> Result<Option<Post>> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE slug = $1 AND (published OR NOT $2)
            "#
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn list(&self, published_only: bool, tag: Option<String>) -> Result<Vec<Post>> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE (published OR NOT $1)
              AND ($2::text IS NULL OR tags @> ARRAY[$2::text])
            ORDER BY created_at DESC
            "#
        );
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(published_only)
            .bind(tag)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
