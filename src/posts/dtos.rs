use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    entities::{Post, PostDraft},
    sanitizer::{plain_text, sanitize, sanitize_post},
};

/// Admin create-or-update payload. `id` present means update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SavePostRequest {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub author_name: String,
    pub published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub reading_time_minutes: Option<i32>,
}

impl SavePostRequest {
    /// Sanitize and normalize the payload into storable column values.
    pub fn into_draft(self) -> Result<PostDraft, String> {
        let title = plain_text(&self.title);
        if title.is_empty() {
            return Err("Title is required".to_string());
        }

        let content = sanitize_post(&self.content);
        if content.is_empty() {
            return Err("Content is required".to_string());
        }

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(given) if !given.is_empty() => slug::slugify(given),
            _ => slug::slugify(&title),
        };
        if slug.is_empty() {
            return Err("Slug could not be derived from the title".to_string());
        }

        let excerpt = self
            .excerpt
            .map(|e| sanitize(&e))
            .filter(|e| !e.trim().is_empty());

        let cover_image = self
            .cover_image
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let mut tags: Vec<String> = Vec::new();
        for tag in self.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let reading_time_minutes = self
            .reading_time_minutes
            .filter(|m| *m > 0)
            .unwrap_or(content.reading_time_minutes as i32);

        Ok(PostDraft {
            title,
            slug,
            excerpt,
            content: content.html,
            cover_image,
            author_name: self.author_name.trim().to_string(),
            published: self.published,
            tags,
            reading_time_minutes,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostListQuery {
    /// Only posts carrying this tag
    pub tag: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
}
