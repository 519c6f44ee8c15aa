use std::sync::LazyLock;

use regex::Regex;

use crate::content::reading::rank_by_frequency;

pub const DEFAULT_MAX_KEYWORDS: usize = 10;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "this", "that", "these", "those", "i", "you", "he", "she", "it",
    "we", "they",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("Failed to compile keyword regex"));

/// Most frequent non-stop-word tokens (three or more letters) across title
/// and content.
pub fn generate_keywords(title: &str, content: &str, max_keywords: usize) -> Vec<String> {
    let text = format!("{} {}", title, content).to_lowercase();
    let tokens = WORD
        .find_iter(&text)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word));

    rank_by_frequency(tokens, max_keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_exclude_stop_words() {
        let keywords = generate_keywords("AI Product Manager", "the and or but with", 10);
        assert_eq!(keywords, vec!["product", "manager"]);
    }

    #[test]
    fn test_keywords_ranked_by_frequency() {
        let keywords = generate_keywords(
            "Pricing experiments",
            "Pricing is hard. Experiments on pricing need guardrails.",
            3,
        );
        assert_eq!(keywords, vec!["pricing", "experiments", "hard"]);
    }

    #[test]
    fn test_keywords_respect_limit_and_min_length() {
        let keywords = generate_keywords("", "go ux api roadmap metrics design research", 2);
        assert_eq!(keywords, vec!["api", "roadmap"]);
    }

    #[test]
    fn test_keywords_empty_input() {
        assert!(generate_keywords("", "", DEFAULT_MAX_KEYWORDS).is_empty());
    }
}
