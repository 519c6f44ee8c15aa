use std::fs;

use crate::sanitizer::{
    MAX_INPUT_BYTES, SanitizeError, policy, sanitize, sanitize_post, tree, try_sanitize,
};

fn load_fixture() -> String {
    fs::read_to_string("src/sanitizer/tests/fixtures/post.html")
        .expect("Failed to read test fixture")
}

/// Every element and attribute in `html` is on the allow-list.
fn assert_allow_list_closed(html: &str) {
    let nodes = tree::parse_fragment(html).unwrap();
    let mut stack: Vec<&tree::Node> = nodes.iter().collect();
    while let Some(node) = stack.pop() {
        if let tree::Node::Element(element) = node {
            assert!(
                policy::is_allowed_tag(&element.name),
                "unexpected tag <{}>",
                element.name
            );
            for (name, _) in &element.attrs {
                assert!(
                    policy::allowed_attributes(&element.name).contains(&name.as_str()),
                    "unexpected attribute {} on <{}>",
                    name,
                    element.name
                );
            }
            stack.extend(element.children.iter());
        }
    }
}

#[test]
fn test_sanitize_fixture_post() {
    let clean = sanitize(&load_fixture());

    assert!(!clean.contains("<script"));
    assert!(!clean.contains("<style"));
    assert!(!clean.contains("<table"));
    assert!(!clean.contains("editor note"));
    assert!(!clean.contains("onclick"));
    assert!(!clean.contains("onerror"));
    assert!(!clean.contains("onmouseover"));
    assert!(!clean.contains("javascript:"));
    assert!(!clean.contains("data:image"));
    assert!(!clean.contains(" id="));

    assert!(clean.contains("<h2>Why roadmaps fail</h2>"));
    assert!(clean.contains(r#"<p style="color: #222">"#));
    assert!(clean.contains(
        r#"<a href="https://example.com/roadmaps" target="_blank" rel="noopener">original essay</a>"#
    ));
    assert!(clean.contains("<a>click here</a>"));
    assert!(clean.contains(
        r#"<img src="https://cdn.example.com/roadmap.png" alt="A roadmap drawn on a whiteboard">"#
    ));
    assert!(clean.contains(r#"<img alt="inline svg">"#));
    assert!(clean.contains(r#"<blockquote class="pull">"#));
    assert!(clean.contains(r#"<pre><code class="language-rust">"#));
    assert!(clean.contains(r#"<li style="font-style: italic">Bets, not promises</li>"#));

    assert_allow_list_closed(&clean);
}

#[test]
fn test_sanitize_inline_handler_script_and_disallowed_tag() {
    let clean = sanitize(r#"<p onclick="alert(1)">Hi <script>bad()</script><b>there</b></p>"#);
    // <b> is not allowed, and its text goes with it
    assert_eq!(clean, "<p>Hi </p>");
}

#[test]
fn test_sanitize_is_idempotent() {
    let inputs = [
        load_fixture(),
        "<p>Unclosed <em>tags<div>More content".to_string(),
        "<ul><li>one<li>two</ul><p>a &amp; b &lt; c</p>".to_string(),
        "<pre>\nleading newline</pre>".to_string(),
        "<p>x<b><div>y</div></b></p>".to_string(),
        "<a href=\"https://a.test\">1<a href=\"https://b.test\">2</a></a>".to_string(),
        "plain text with \u{a0} nbsp & \"quotes\"".to_string(),
        "<h1><h2>nested headings</h2></h1>".to_string(),
        "<a href=\"https://a.test\">1<table><a href=\"https://b.test\">2</a></table></a>".to_string(),
        "<ul><li>outer<table><li>inner</li></table></li></ul>".to_string(),
        "<h1>outer<table><h2>inner</h2></table></h1>".to_string(),
    ];

    for input in &inputs {
        let once = sanitize(input);
        let twice = sanitize(&once);
        assert_eq!(once, twice, "not idempotent for input: {}", input);
    }
}

#[test]
fn test_foster_parented_content_settles() {
    // Content lifted out of a dropped <table> must come out in the shape the
    // parser gives it when the sanitized markup is read back.
    assert_eq!(
        sanitize(r#"<a href="https://a.test">1<table><a href="https://b.test">2</a></table></a>"#),
        r#"<a href="https://a.test">1</a><a href="https://b.test">2</a>"#
    );
    assert_eq!(
        sanitize("<ul><li>outer<table><li>inner</li></table></li></ul>"),
        "<ul><li>outer</li><li>inner</li></ul>"
    );
    assert_eq!(
        sanitize("<h1>outer<table><h2>inner</h2></table></h1>"),
        "<h1>outer</h1><h2>inner</h2>"
    );
}

#[test]
fn test_sanitize_handles_malformed_html() {
    let clean = sanitize("<p>Unclosed tags<div>More content");
    assert!(clean.contains("Unclosed tags"));
    assert!(clean.contains("More content"));
    assert_allow_list_closed(&clean);
}

#[test]
fn test_sanitize_empty_and_text_only() {
    assert_eq!(sanitize(""), "");
    assert_eq!(sanitize("just words"), "just words");
    assert_eq!(sanitize("<script>only()</script>"), "");
}

#[test]
fn test_sanitize_escapes_text_entities() {
    assert_eq!(
        sanitize("<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"),
        "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
    );
}

#[test]
fn test_oversized_input_fails_closed() {
    let huge = "a".repeat(MAX_INPUT_BYTES + 1);
    assert_eq!(
        try_sanitize(&huge),
        Err(SanitizeError::TooLarge(MAX_INPUT_BYTES + 1))
    );
    assert_eq!(sanitize(&huge), "");

    // Escaping grows the output past the input bound
    let amps = "&".repeat(MAX_INPUT_BYTES / 2);
    assert!(matches!(try_sanitize(&amps), Err(SanitizeError::TooLarge(_))));
    assert_eq!(sanitize(&amps), "");
}

#[test]
fn test_deep_nesting_fails_closed() {
    let deep = format!("{}text", "<span>".repeat(1000));
    assert!(matches!(try_sanitize(&deep), Err(SanitizeError::TooDeep(_))));
    assert_eq!(sanitize(&deep), "");

    let report = sanitize_post(&deep);
    assert!(report.is_empty());
    assert_eq!(report.word_count, 0);
    assert_eq!(report.reading_time_minutes, 1);
}

#[test]
fn test_sanitize_post_counts_words_of_clean_text() {
    let body = format!(
        "<p>{}</p><script>{}</script>",
        "word ".repeat(250),
        "hidden ".repeat(500)
    );
    let report = sanitize_post(&body);
    assert_eq!(report.word_count, 250);
    assert_eq!(report.reading_time_minutes, 2);
    assert!(!report.html.contains("hidden"));
}

#[test]
fn test_sanitize_post_does_not_split_words_at_inline_markup() {
    let report = sanitize_post("<p>Hel<em>lo</em> wor<strong>l</strong>d</p>");
    assert_eq!(report.word_count, 2);
}

#[test]
fn test_sanitize_post_separates_adjacent_blocks() {
    let report = sanitize_post("<p>one</p><p>two</p>");
    assert_eq!(report.word_count, 2);
    assert_eq!(report.reading_time_minutes, 1);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_sanitize_never_panics(html in ".*") {
            let _ = sanitize(&html);
        }

        #[test]
        fn test_sanitize_idempotent(
            html in r#"(<(p|b|a|img|script|div|span|pre|ul|li|h1|h2|table|tr|td) ?(href="javascript:x"|onclick="y"|style="color:red"|src="https://a.test")?>|[a-z &<>]{0,8}|</(p|b|a|div|span|pre|ul|li|h1|h2|table|tr|td)>){0,20}"#
        ) {
            let once = sanitize(&html);
            prop_assert_eq!(sanitize(&once), once.clone());
            assert_allow_list_closed(&once);
        }
    }
}
