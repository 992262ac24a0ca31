//! Rendered output tree
//!
//! Every renderer in this crate produces a [`Node`] rather than a string so
//! that callers (and tests) can inspect structure before serialising.

use indexmap::IndexMap;

/// Element attributes, kept in insertion order so output is deterministic
pub type Attributes = IndexMap<String, String>;

/// Elements that never take a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node in a rendered tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An HTML element
    Element(Element),
    /// Text content, escaped on output
    Text(String),
    /// Pre-rendered HTML, emitted verbatim
    Raw(String),
    /// Renders nothing
    Empty,
}

/// An HTML element with attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    /// Set an attribute only when a value is present
    pub fn attr_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set the `class` attribute
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a child node
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several child nodes
    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Value of the `class` attribute, if any
    pub fn class_name(&self) -> Option<&str> {
        self.attrs.get("class").map(String::as_str)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Whether this node renders nothing
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// The element, if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and all its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Raw(_) | Node::Empty => {}
        }
    }

    /// Serialise to an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape(text)),
            Node::Raw(html) => out.push_str(html),
            Node::Empty => {}
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push_str(&format!(r#" {}="{}""#, name, html_escape(value)));
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }

                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str(&format!("</{}>", el.tag));
            }
        }
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_to_html() {
        let node: Node = Element::new("a")
            .attr("href", "/posts/a")
            .text("Tom & Jerry")
            .into();
        assert_eq!(node.to_html(), r#"<a href="/posts/a">Tom &amp; Jerry</a>"#);
    }

    #[test]
    fn test_void_element() {
        let node: Node = Element::new("link").attr("rel", "stylesheet").into();
        assert_eq!(node.to_html(), r#"<link rel="stylesheet">"#);
    }

    #[test]
    fn test_attribute_escaping() {
        let node: Node = Element::new("span").attr("title", r#"say "hi""#).into();
        assert_eq!(node.to_html(), r#"<span title="say &quot;hi&quot;"></span>"#);
    }

    #[test]
    fn test_empty_and_raw() {
        assert_eq!(Node::Empty.to_html(), "");
        assert!(Node::Empty.is_empty());
        assert_eq!(Node::Raw("<b>x</b>".to_string()).to_html(), "<b>x</b>");
    }

    #[test]
    fn test_text_content() {
        let node: Node = Element::new("div")
            .child(Element::new("span").text("a"))
            .text("b")
            .child(Node::Raw("<i>ignored</i>".to_string()))
            .into();
        assert_eq!(node.text_content(), "ab");
    }
}
