use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::sanitizer::tree;

const MIN_ALT_LEN: usize = 5;
const MAX_ALT_LEN: usize = 125;
const REDUNDANT_PREFIXES: &[&str] = &["image of", "picture of", "photo of"];

pub const DEFAULT_WIDTHS: &[u32] = &[320, 640, 960, 1280];
pub const DEFAULT_BREAKPOINTS: &[(u32, &str)] = &[(640, "100vw"), (1024, "50vw")];
pub const DEFAULT_SIZE: &str = "33vw";

static FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\S+\.(jpe?g|png|gif|webp|svg|avif)$")
        .expect("Failed to compile file name regex")
});

/// Advisory accessibility report for an image's alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AltTextReport {
    pub valid: bool,
    pub suggestions: Vec<String>,
}

pub fn validate_alt_text(alt: Option<&str>) -> AltTextReport {
    let mut suggestions = Vec::new();
    let alt = alt.map(str::trim).unwrap_or_default();

    if alt.is_empty() {
        suggestions.push("Add descriptive alt text for screen readers".to_string());
    } else {
        let len = alt.chars().count();
        if len < MIN_ALT_LEN {
            suggestions.push("Alt text is very short; describe what the image shows".to_string());
        }
        if len > MAX_ALT_LEN {
            suggestions.push(format!(
                "Keep alt text under {} characters",
                MAX_ALT_LEN
            ));
        }
        let lower = alt.to_lowercase();
        if let Some(prefix) = REDUNDANT_PREFIXES.iter().find(|p| lower.starts_with(**p)) {
            suggestions.push(format!(
                "Drop the leading \"{}\"; screen readers already announce images",
                prefix
            ));
        }
        if FILE_NAME.is_match(alt) {
            suggestions.push("Alt text looks like a file name".to_string());
        }
    }

    AltTextReport {
        valid: suggestions.is_empty(),
        suggestions,
    }
}

/// Alt-text findings for every `<img>` in an HTML fragment, keyed by `src`.
pub fn audit_images(html: &str) -> Vec<(String, AltTextReport)> {
    let Ok(nodes) = tree::parse_fragment(html) else {
        return Vec::new();
    };
    tree::find_elements(&nodes, "img")
        .into_iter()
        .map(|img| {
            (
                img.attr("src").unwrap_or_default().to_string(),
                validate_alt_text(img.attr("alt")),
            )
        })
        .filter(|(_, report)| !report.valid)
        .collect()
}

/// `srcset` candidates for `src` at each width, using a `w` query parameter.
pub fn generate_srcset(src: &str, widths: &[u32]) -> String {
    let separator = if src.contains('?') { '&' } else { '?' };
    widths
        .iter()
        .map(|w| format!("{}{}w={} {}w", src, separator, w, w))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `sizes` attribute from `(max-width, size)` breakpoints plus a fallback.
pub fn generate_sizes(breakpoints: &[(u32, &str)], default: &str) -> String {
    breakpoints
        .iter()
        .map(|(max_width, size)| format!("(max-width: {}px) {}", max_width, size))
        .chain(std::iter::once(default.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResponsiveImage {
    pub src: String,
    pub srcset: String,
    pub sizes: String,
}

impl ResponsiveImage {
    pub fn for_cover(src: &str) -> Self {
        Self {
            src: src.to_string(),
            srcset: generate_srcset(src, DEFAULT_WIDTHS),
            sizes: generate_sizes(DEFAULT_BREAKPOINTS, DEFAULT_SIZE),
        }
    }
}
