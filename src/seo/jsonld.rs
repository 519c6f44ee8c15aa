use serde_json::json;

use crate::entities::Post;
use crate::sanitizer::plain_text;
use crate::seo::meta::canonical_url;

/// schema.org `BlogPosting` structured data for a post, as a ready-to-embed
/// `<script>` element.
pub fn blog_posting_jsonld(post: &Post, site_url: &str, brand: &str) -> String {
    let url = canonical_url(site_url, &format!("/blog/{}", post.slug));

    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.excerpt.as_deref().map(plain_text).unwrap_or_default(),
        "url": url,
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
        "datePublished": post.created_at.to_rfc3339(),
        "dateModified": post.updated_at.to_rfc3339(),
        "author": { "@type": "Person", "name": post.author_name },
        "publisher": { "@type": "Person", "name": brand, "url": site_url },
        "keywords": post.tags.join(", "),
        "timeRequired": format!("PT{}M", post.reading_time_minutes),
    });

    if let Some(image) = post.cover_image.as_deref().filter(|s| !s.is_empty()) {
        data["image"] = json!(image);
    }

    // "</" would end the surrounding script element early
    let body = data.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, body)
}
