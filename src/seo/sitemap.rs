use crate::entities::Post;
use crate::sanitizer::tree::html_escape;
use crate::seo::meta::canonical_url;

/// sitemap.xml for the home page, the blog index and every published post.
pub fn generate_sitemap(site_url: &str, posts: &[Post]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    xml.push_str(&format!(
        "  <url><loc>{}</loc><changefreq>weekly</changefreq><priority>1.0</priority></url>\n",
        html_escape(&canonical_url(site_url, "/"))
    ));
    xml.push_str(&format!(
        "  <url><loc>{}</loc><changefreq>daily</changefreq><priority>0.8</priority></url>\n",
        html_escape(&canonical_url(site_url, "/blog"))
    ));

    for post in posts.iter().filter(|p| p.published) {
        let loc = canonical_url(site_url, &format!("/blog/{}", post.slug));
        xml.push_str(&format!(
            "  <url><loc>{}</loc><lastmod>{}</lastmod><priority>0.6</priority></url>\n",
            html_escape(&loc),
            post.updated_at.format("%Y-%m-%d")
        ));
    }

    xml.push_str("</urlset>");
    xml
}
