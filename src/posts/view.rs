use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::Config,
    content::{ResponsiveImage, calculate_reading_time, suggest_tags},
    entities::Post,
    sanitizer::plain_text,
    seo::{
        add_internal_links, blog_posting_jsonld, build_meta_tags, canonical_url,
        generate_keywords, keywords::DEFAULT_MAX_KEYWORDS, meta::MAX_DESCRIPTION_LEN,
        meta::MetaTags, optimize_description, optimize_title,
    },
};

/// A published post with everything the page template needs for SEO.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostView {
    pub post: Post,
    /// Post body with internal links applied
    pub html: String,
    pub meta_title: String,
    pub meta_description: String,
    pub canonical_url: String,
    pub keywords: Vec<String>,
    pub suggested_tags: Vec<String>,
    pub reading_time_minutes: u32,
    /// `<head>` markup: title, description, canonical, Open Graph, Twitter
    pub meta_tags: String,
    pub json_ld: String,
    pub cover: Option<ResponsiveImage>,
}

pub fn post_path(slug: &str) -> String {
    format!("/blog/{}", slug)
}

impl PostView {
    pub fn render(post: Post, config: &Config) -> Self {
        let path = post_path(&post.slug);
        let text = plain_text(&post.content);

        let meta_title = optimize_title(&post.title, config.brand_name());
        let description_source = match post.excerpt.as_deref().map(plain_text) {
            Some(excerpt) if !excerpt.is_empty() => excerpt,
            _ => text.clone(),
        };
        let meta_description = optimize_description(&description_source, MAX_DESCRIPTION_LEN);
        let canonical = canonical_url(config.site_url(), &path);

        let cover = post
            .cover_image
            .as_deref()
            .filter(|src| !src.is_empty())
            .map(ResponsiveImage::for_cover);

        let meta_tags = build_meta_tags(&MetaTags {
            title: &meta_title,
            description: &meta_description,
            canonical: &canonical,
            site_name: config.brand_name(),
            image: post.cover_image.as_deref().filter(|src| !src.is_empty()),
            og_type: "article",
        });

        Self {
            html: add_internal_links(&post.content, &path),
            keywords: generate_keywords(&post.title, &text, DEFAULT_MAX_KEYWORDS),
            suggested_tags: suggest_tags(&text, &post.title),
            reading_time_minutes: calculate_reading_time(&text),
            json_ld: blog_posting_jsonld(&post, config.site_url(), config.brand_name()),
            meta_title,
            meta_description,
            canonical_url: canonical,
            meta_tags,
            cover,
            post,
        }
    }
}
