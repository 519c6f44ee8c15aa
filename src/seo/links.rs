use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::sanitizer::tree::html_escape;

/// A keyword that links to another page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalLink {
    pub keyword: &'static str,
    pub url: &'static str,
    pub title: &'static str,
}

pub const INTERNAL_LINKS: &[InternalLink] = &[
    InternalLink {
        keyword: "AI Product Manager",
        url: "/",
        title: "Insha Kanue - AI Product Manager",
    },
    InternalLink {
        keyword: "product management",
        url: "/blog/tag/product-management",
        title: "Articles on product management",
    },
    InternalLink {
        keyword: "product strategy",
        url: "/blog/tag/product-strategy",
        title: "Articles on product strategy",
    },
    InternalLink {
        keyword: "machine learning",
        url: "/blog/tag/machine-learning",
        title: "Articles on machine learning",
    },
    InternalLink {
        keyword: "user research",
        url: "/blog/tag/user-research",
        title: "Articles on user research",
    },
    InternalLink {
        keyword: "blog",
        url: "/blog",
        title: "All blog posts",
    },
];

// Existing anchors with their contents, and any other tag, comment or
// declaration. A bare "<" followed by anything else is text.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<a\b[^>]*>.*?</a\s*>|<[a-z/!?][^>]*>")
        .expect("Failed to compile markup regex")
});

/// Link the first occurrence of each keyword in [`INTERNAL_LINKS`].
///
/// `content` is expected to be sanitized HTML, where a literal `<` in text is
/// always escaped.
pub fn add_internal_links(content: &str, current_url: &str) -> String {
    add_links_from(content, current_url, INTERNAL_LINKS)
}

/// Link the first occurrence of each keyword in `table`, in table order.
///
/// Entries pointing at the current page are skipped, except the root path
/// which is linked from every page. Matches inside markup or inside an
/// existing anchor are never rewritten.
pub fn add_links_from(content: &str, current_url: &str, table: &[InternalLink]) -> String {
    let (linked, _) = table.iter().fold(
        (content.to_string(), HashSet::new()),
        |(html, mut used), link| {
            let key = link.keyword.to_lowercase();
            if used.contains(&key) || is_self_link(current_url, link.url) {
                return (html, used);
            }
            match link_first_occurrence(&html, link) {
                Some(updated) => {
                    used.insert(key);
                    (updated, used)
                }
                None => (html, used),
            }
        },
    );
    linked
}

fn is_self_link(current_url: &str, target: &str) -> bool {
    target != "/" && current_url.contains(target)
}

fn link_first_occurrence(html: &str, link: &InternalLink) -> Option<String> {
    let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(link.keyword))).ok()?;
    let protected: Vec<Range<usize>> = MARKUP.find_iter(html).map(|m| m.range()).collect();

    let hit = pattern.find_iter(html).find(|m| {
        !protected
            .iter()
            .any(|range| m.start() < range.end && range.start < m.end())
    })?;

    Some(format!(
        r#"{}<a href="{}" title="{}">{}</a>{}"#,
        &html[..hit.start()],
        html_escape(link.url),
        html_escape(link.title),
        hit.as_str(),
        &html[hit.end()..]
    ))
}
