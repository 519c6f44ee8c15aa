use scraper::{ElementRef, Html, node::Node as DomNode};

use crate::sanitizer::{MAX_DEPTH, SanitizeError};

/// Owned HTML fragment tree. Comments, doctypes and processing instructions
/// never make it in here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "code", "em", "i", "small", "span", "strong", "sub", "sup", "u",
];

/// Parse `html` as a body fragment and copy it into an owned tree.
pub fn parse_fragment(html: &str) -> Result<Vec<Node>, SanitizeError> {
    let document = Html::parse_fragment(html);

    // html5ever wraps fragments in a synthetic <html> element
    let root = document
        .tree
        .root()
        .children()
        .find_map(ElementRef::wrap)
        .ok_or(SanitizeError::MissingRoot)?;

    convert_children(root, 1)
}

fn convert_children(parent: ElementRef<'_>, depth: usize) -> Result<Vec<Node>, SanitizeError> {
    if depth > MAX_DEPTH {
        return Err(SanitizeError::TooDeep(MAX_DEPTH));
    }

    let mut nodes = Vec::new();
    for child in parent.children() {
        match child.value() {
            DomNode::Text(text) => nodes.push(Node::Text(text.text.to_string())),
            DomNode::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    let value = element.value();
                    nodes.push(Node::Element(Element {
                        name: value.name().to_string(),
                        attrs: value
                            .attrs()
                            .map(|(key, val)| (key.to_string(), val.to_string()))
                            .collect(),
                        children: convert_children(element, depth + 1)?,
                    }));
                }
            }
            _ => {}
        }
    }
    Ok(nodes)
}

/// Serialize nodes following the HTML fragment serialization rules.
pub fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => escape_text_into(text, out),
        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (key, value) in &element.attrs {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                escape_attr_into(value, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&element.name.as_str()) {
                return;
            }

            // The parser swallows one leading newline inside <pre>
            if element.name == "pre"
                && let Some(Node::Text(first)) = element.children.first()
                && first.starts_with('\n')
            {
                out.push('\n');
            }

            for child in &element.children {
                write_node(child, out);
            }

            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
}

/// Concatenated text of the tree. Block boundaries and line breaks become a
/// space; text inside inline elements joins its neighbours directly.
pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                let inline = INLINE_ELEMENTS.contains(&element.name.as_str());
                if !inline {
                    out.push(' ');
                }
                collect_text(&element.children, out);
                if !inline {
                    out.push(' ');
                }
            }
        }
    }
}

/// All elements named `name`, in document order.
pub fn find_elements<'a>(nodes: &'a [Node], name: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    for node in nodes {
        if let Node::Element(element) = node {
            if element.name == name {
                found.push(element);
            }
            found.extend(find_elements(&element.children, name));
        }
    }
    found
}

pub fn escape_text_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

pub fn escape_attr_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

/// Escape for both text and double-quoted attribute contexts.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_structure() {
        let nodes = parse_fragment("<p>Hello <em>world</em></p>").unwrap();
        assert_eq!(nodes.len(), 1);
        let Node::Element(p) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(p.name, "p");
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[0], Node::Text("Hello ".to_string()));
    }

    #[test]
    fn test_parse_drops_comments() {
        let nodes = parse_fragment("<!-- hidden --><p>x</p>").unwrap();
        assert_eq!(serialize(&nodes), "<p>x</p>");
    }

    #[test]
    fn test_parse_rejects_deep_nesting() {
        let html = "<div>".repeat(MAX_DEPTH + 10);
        assert_eq!(parse_fragment(&html), Err(SanitizeError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn test_serialize_void_and_escaping() {
        let nodes = vec![
            Node::Element(Element {
                name: "img".to_string(),
                attrs: vec![("alt".to_string(), "a \"quoted\" & <b>".to_string())],
                children: vec![],
            }),
            Node::Text("1 < 2 & 3\u{a0}".to_string()),
        ];
        assert_eq!(
            serialize(&nodes),
            "<img alt=\"a &quot;quoted&quot; &amp; <b>\">1 &lt; 2 &amp; 3&nbsp;"
        );
    }

    #[test]
    fn test_pre_leading_newline_round_trips() {
        let nodes = parse_fragment("<pre>\n\nindented</pre>").unwrap();
        let html = serialize(&nodes);
        assert_eq!(serialize(&parse_fragment(&html).unwrap()), html);
    }

    #[test]
    fn test_text_content_separates_blocks() {
        let nodes = parse_fragment("<p>one</p><p>two <em>three</em></p>").unwrap();
        assert_eq!(
            text_content(&nodes).split_whitespace().collect::<Vec<_>>(),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_text_content_joins_inline_runs() {
        let nodes = parse_fragment("<p>Hel<em>lo</em> <a>wor</a>ld<br>next</p>").unwrap();
        assert_eq!(
            text_content(&nodes).split_whitespace().collect::<Vec<_>>(),
            vec!["Hello", "world", "next"]
        );
    }

    #[test]
    fn test_find_elements_in_document_order() {
        let nodes = parse_fragment(r#"<img alt="a"><p><img alt="b"></p>"#).unwrap();
        let alts: Vec<_> = find_elements(&nodes, "img")
            .iter()
            .filter_map(|img| img.attr("alt"))
            .collect();
        assert_eq!(alts, vec!["a", "b"]);
    }
}
