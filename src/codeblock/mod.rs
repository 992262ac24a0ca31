//! Code fence classification and rendering
//!
//! A `pre` element coming out of authored content is classified once, at the
//! boundary, into a [`CodeFence`]. Classified fences are highlighted and
//! rendered line by line; anything else is rendered back verbatim.

use lazy_static::lazy_static;
use regex::Regex;

use crate::highlight::{Highlighted, Highlighter, StyleProps};
use crate::markup::{Attributes, Element, Node};

lazy_static! {
    static ref LANGUAGE_CLASS: Regex = Regex::new(r"^language-(\S+)$").unwrap();
}

/// Raw properties of a preformatted element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeFenceProps {
    pub attrs: Attributes,
    pub children: Vec<Node>,
}

impl CodeFenceProps {
    /// Props of a `pre > code` block, as produced for an authored fence
    pub fn fenced(language: Option<&str>, source: &str) -> Self {
        let code = Element::new("code")
            .attr_opt("class", language.map(|lang| format!("language-{}", lang)))
            .text(source);

        Self {
            attrs: Attributes::new(),
            children: vec![code.into()],
        }
    }
}

/// Source text and language of a recognised fence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCodeBlock {
    pub source_text: String,
    pub language_id: Option<String>,
}

/// Result of inspecting a `pre` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeFence {
    Classified(ClassifiedCodeBlock),
    NotAFence,
}

impl CodeFence {
    /// The classified block, if any
    pub fn classified(&self) -> Option<&ClassifiedCodeBlock> {
        match self {
            CodeFence::Classified(block) => Some(block),
            CodeFence::NotAFence => None,
        }
    }
}

/// Decide whether `props` describe a fenced code block
///
/// A fence is a `pre` whose only child is a `code` element. The language is
/// read from a `language-*` class on that element.
pub fn classify(props: &CodeFenceProps) -> CodeFence {
    let [Node::Element(code)] = props.children.as_slice() else {
        return CodeFence::NotAFence;
    };
    if code.tag != "code" {
        return CodeFence::NotAFence;
    }

    let text = Node::Element(code.clone()).text_content();
    let source_text = text.trim_end_matches(['\n', '\r']).to_string();

    CodeFence::Classified(ClassifiedCodeBlock {
        source_text,
        language_id: code.class_name().and_then(language_from_class),
    })
}

/// Language id from the first `language-*` token of a class attribute
fn language_from_class(class_name: &str) -> Option<String> {
    class_name.split_whitespace().find_map(|class| {
        LANGUAGE_CLASS
            .captures(class)
            .map(|caps| caps[1].to_string())
    })
}

/// Renders `pre` elements as highlighted code blocks
pub struct CodeBlockRenderer<H> {
    highlighter: H,
    anchor_class: String,
}

impl<H: Highlighter> CodeBlockRenderer<H> {
    /// Create a renderer; `anchor_class` is added to every highlighted block
    pub fn new(highlighter: H, anchor_class: &str) -> Self {
        Self {
            highlighter,
            anchor_class: anchor_class.to_string(),
        }
    }

    /// The highlighter in use
    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }

    /// Render a `pre` element
    pub fn render(&self, props: &CodeFenceProps) -> Node {
        match classify(props) {
            CodeFence::Classified(block) => self.render_classified(&block),
            CodeFence::NotAFence => {
                tracing::debug!("pre element is not a code fence, rendering verbatim");
                verbatim(props)
            }
        }
    }

    fn render_classified(&self, block: &ClassifiedCodeBlock) -> Node {
        let Highlighted { props, lines } = self
            .highlighter
            .highlight(&block.source_text, block.language_id.as_deref());

        let class = join_classes(&self.anchor_class, &props.class_name);
        let lines = lines.map(|line| {
            let tokens = line
                .tokens
                .into_iter()
                .map(|token| styled(Element::new("span"), token.props).text(token.content));
            styled(Element::new("div"), line.props).children(tokens)
        });

        Element::new("pre")
            .class(class)
            .attr_opt("style", props.style)
            .children(lines)
            .into()
    }
}

/// A `pre` carrying its input attributes and children untouched
fn verbatim(props: &CodeFenceProps) -> Node {
    Node::Element(Element {
        tag: "pre".to_string(),
        attrs: props.attrs.clone(),
        children: props.children.clone(),
    })
}

fn styled(element: Element, props: StyleProps) -> Element {
    let element = if props.class_name.is_empty() {
        element
    } else {
        element.class(props.class_name)
    };
    element.attr_opt("style", props.style)
}

/// Both class lists, in order, skipping empties
fn join_classes(first: &str, second: &str) -> String {
    [first, second]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
