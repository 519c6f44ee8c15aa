use std::collections::HashMap;
use std::sync::LazyLock;

use crate::sanitizer::style::filter_style;
use crate::sanitizer::tree::{Element, Node};

const BLOCK_ATTRS: &[&str] = &["class", "style"];
const CLASS_ONLY: &[&str] = &["class"];
const NO_ATTRS: &[&str] = &[];

/// Allowed tags and, per tag, the attributes they may keep. Attributes are
/// emitted in the order listed here.
const TAG_POLICY: &[(&str, &[&str])] = &[
    ("p", BLOCK_ATTRS),
    ("br", NO_ATTRS),
    ("strong", NO_ATTRS),
    ("em", NO_ATTRS),
    ("u", NO_ATTRS),
    ("h1", BLOCK_ATTRS),
    ("h2", BLOCK_ATTRS),
    ("h3", BLOCK_ATTRS),
    ("h4", BLOCK_ATTRS),
    ("h5", BLOCK_ATTRS),
    ("h6", BLOCK_ATTRS),
    ("ul", CLASS_ONLY),
    ("ol", CLASS_ONLY),
    ("li", BLOCK_ATTRS),
    ("a", &["href", "title", "target", "rel"]),
    ("img", &["src", "alt", "title", "width", "height"]),
    ("blockquote", BLOCK_ATTRS),
    ("pre", CLASS_ONLY),
    ("code", CLASS_ONLY),
    ("div", BLOCK_ATTRS),
    ("span", BLOCK_ATTRS),
];

static ALLOWED: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| TAG_POLICY.iter().copied().collect());

const HREF_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];
const SRC_SCHEMES: &[&str] = &["http://", "https://"];

pub fn is_allowed_tag(name: &str) -> bool {
    ALLOWED.contains_key(name)
}

pub fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    ALLOWED.get(tag).copied().unwrap_or(NO_ATTRS)
}

/// Rebuild the forest keeping only what the policy allows. A disallowed
/// element is dropped together with its whole subtree.
pub fn clean(nodes: &[Node]) -> Vec<Node> {
    nodes.iter().filter_map(clean_node).collect()
}

fn clean_node(node: &Node) -> Option<Node> {
    match node {
        Node::Text(text) => Some(Node::Text(text.clone())),
        Node::Element(element) => {
            let allowed = ALLOWED.get(element.name.as_str())?;
            let attrs = allowed
                .iter()
                .filter_map(|name| {
                    let value = element.attr(name)?;
                    clean_attribute(name, value).map(|v| (name.to_string(), v))
                })
                .collect();

            Some(Node::Element(Element {
                name: element.name.clone(),
                attrs,
                children: clean(&element.children),
            }))
        }
    }
}

fn clean_attribute(name: &str, value: &str) -> Option<String> {
    match name {
        "href" => has_allowed_scheme(value, HREF_SCHEMES).then(|| value.to_string()),
        "src" => has_allowed_scheme(value, SRC_SCHEMES).then(|| value.to_string()),
        "style" => filter_style(value),
        _ => Some(value.to_string()),
    }
}

fn has_allowed_scheme(value: &str, schemes: &[&str]) -> bool {
    let value = value.trim().to_ascii_lowercase();
    schemes.iter().any(|scheme| value.starts_with(scheme))
}
