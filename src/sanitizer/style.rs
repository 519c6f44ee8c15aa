use std::sync::LazyLock;

use regex::Regex;

const ALLOWED_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "font-size",
    "font-weight",
    "text-align",
    "text-decoration",
    "font-style",
];

// CSS escapes and url() are rejected as well; they are the usual ways around
// a keyword blocklist.
static BLOCKED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)javascript|expression|@?import|url\s*\(|\\")
        .expect("Failed to compile style blocklist regex")
});

/// Filter an inline `style` value down to allowed declarations.
///
/// Returns `None` when nothing survives so the caller drops the attribute.
pub fn filter_style(style: &str) -> Option<String> {
    let kept: Vec<String> = style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if value.is_empty()
                || !ALLOWED_PROPERTIES.contains(&property.as_str())
                || BLOCKED_VALUE.is_match(value)
            {
                return None;
            }
            Some(format!("{}: {}", property, value))
        })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("; "))
    }
}
