use crate::config::DEFAULT_BRAND_NAME;
use crate::sanitizer::tree::html_escape;

pub const MAX_TITLE_LEN: usize = 60;
pub const MAX_DESCRIPTION_LEN: usize = 160;

const SEPARATOR: &str = " | ";
const ELLIPSIS: &str = "...";

/// Fit `title` into 60 characters with the brand suffix.
///
/// The brand is never dropped when it fits at all; the title is what shrinks.
pub fn optimize_title(title: &str, brand: &str) -> String {
    if title.contains(brand) {
        if char_len(title) <= MAX_TITLE_LEN {
            return title.to_string();
        }
        return format!(
            "{}{}",
            truncate_chars(title, MAX_TITLE_LEN - ELLIPSIS.len()),
            ELLIPSIS
        );
    }

    let full = format!("{}{}{}", title, SEPARATOR, brand);
    if char_len(&full) <= MAX_TITLE_LEN {
        return full;
    }

    let available = MAX_TITLE_LEN.saturating_sub(SEPARATOR.len() + char_len(brand));
    if available >= ELLIPSIS.len() {
        format!(
            "{}{}{}{}",
            truncate_chars(title, available - ELLIPSIS.len()),
            ELLIPSIS,
            SEPARATOR,
            brand
        )
    } else if char_len(brand) + SEPARATOR.len() <= MAX_TITLE_LEN {
        // no room for an ellipsis, keep the brand anyway
        format!("{}{}{}", truncate_chars(title, available), SEPARATOR, brand)
    } else {
        format!(
            "{}{}",
            truncate_chars(&full, MAX_TITLE_LEN - ELLIPSIS.len()),
            ELLIPSIS
        )
    }
}

pub fn optimize_title_default(title: &str) -> String {
    optimize_title(title, DEFAULT_BRAND_NAME)
}

/// Shorten `desc` to `max_length` characters, preferring a sentence end in
/// the last fifth of the budget and otherwise a word boundary plus "...".
///
/// A single overlong token has no boundary to cut at; the result is then the
/// first `max_length` characters plus "..." and exceeds the budget by three.
pub fn optimize_description(desc: &str, max_length: usize) -> String {
    if char_len(desc) <= max_length {
        return desc.to_string();
    }

    let slice = truncate_chars(desc, max_length);

    if let Some(pos) = slice.rfind('.') {
        let period_at = char_len(&slice[..pos]);
        if period_at * 5 >= max_length * 4 {
            return slice[..=pos].to_string();
        }
    }

    let fitting = truncate_chars(slice, max_length.saturating_sub(ELLIPSIS.len()));
    match fitting.rfind(' ').or_else(|| slice.rfind(' ')) {
        Some(pos) => format!("{}{}", &slice[..pos], ELLIPSIS),
        None => format!("{}{}", slice, ELLIPSIS),
    }
}

/// Absolute URL for `path` on `base`, with exactly one slash between them.
pub fn canonical_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, Default)]
pub struct MetaTags<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub canonical: &'a str,
    pub site_name: &'a str,
    pub image: Option<&'a str>,
    pub og_type: &'a str,
}

/// `<head>` tags for a page: title, description, canonical, Open Graph and
/// Twitter card.
pub fn build_meta_tags(tags: &MetaTags<'_>) -> String {
    let title = html_escape(tags.title);
    let description = html_escape(tags.description);
    let canonical = html_escape(tags.canonical);

    let mut meta = format!(
        r#"<title>{title}</title>
<meta name="description" content="{description}">
<link rel="canonical" href="{canonical}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
<meta property="og:url" content="{canonical}">
<meta property="og:site_name" content="{}">
<meta property="og:type" content="{}">"#,
        html_escape(tags.site_name),
        html_escape(tags.og_type),
    );

    let card = if tags.image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };
    meta.push_str(&format!(
        r#"
<meta name="twitter:card" content="{card}">
<meta name="twitter:title" content="{title}">
<meta name="twitter:description" content="{description}">"#
    ));

    if let Some(image) = tags.image {
        let image = html_escape(image);
        meta.push_str(&format!(
            r#"
<meta property="og:image" content="{image}">
<meta name="twitter:image" content="{image}">"#
        ));
    }

    meta
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
