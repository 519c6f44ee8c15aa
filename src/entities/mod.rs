use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// --- Tables ---

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String, // sanitized HTML
    pub cover_image: Option<String>,
    pub author_name: String,
    pub published: bool,
    pub tags: Vec<String>,
    pub reading_time_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for an insert or a full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub author_name: String,
    pub published: bool,
    pub tags: Vec<String>,
    pub reading_time_minutes: i32,
}

impl PostDraft {
    /// Materialize a row, for stores that do not assign ids themselves.
    pub fn into_post(self, id: Uuid, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            cover_image: self.cover_image,
            author_name: self.author_name,
            published: self.published,
            tags: self.tags,
            reading_time_minutes: self.reading_time_minutes,
            created_at,
            updated_at,
        }
    }
}
