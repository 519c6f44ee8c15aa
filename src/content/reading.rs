use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub const WORDS_PER_MINUTE: usize = 200;
pub const MAX_SUGGESTED_TAGS: usize = 5;
const MIN_TAG_LEN: usize = 4;

const TAG_STOP_WORDS: &[&str] = &[
    "about", "also", "been", "from", "have", "into", "just", "more", "most", "other", "over",
    "said", "some", "such", "than", "that", "their", "them", "then", "there", "these", "they",
    "this", "very", "were", "what", "when", "which", "will", "with", "would", "your",
];

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Failed to compile punctuation regex"));

/// Estimated reading time in whole minutes, never less than one.
pub fn calculate_reading_time(content: &str) -> u32 {
    reading_time_for_words(content.split_whitespace().count())
}

pub fn reading_time_for_words(words: usize) -> u32 {
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Up to five lowercase tag candidates ranked by frequency across title and
/// content. Ties keep first-seen order.
pub fn suggest_tags(content: &str, title: &str) -> Vec<String> {
    let text = format!("{} {}", title, content).to_lowercase();
    let text = NON_WORD.replace_all(&text, "");

    let tokens = text
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TAG_LEN && !TAG_STOP_WORDS.contains(word));

    rank_by_frequency(tokens, MAX_SUGGESTED_TAGS)
}

/// Rank tokens by descending count; the stable sort keeps first-seen order
/// among equal counts.
pub(crate) fn rank_by_frequency<'a>(
    tokens: impl Iterator<Item = &'a str>,
    limit: usize,
) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for token in tokens {
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(limit)
        .map(str::to_string)
        .collect()
}
