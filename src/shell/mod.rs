//! Page shell - the frame rendered content is embedded in
//!
//! The shell only wraps content. It never inspects what it wraps.

use crate::config::SiteConfig;
use crate::helpers::url_for;
use crate::markup::{Element, Node};

/// Wraps a rendered page body
pub trait PageShell {
    fn wrap(&self, title: Option<&str>, content: Node) -> Node;
}

/// The centered column every page sits in
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout;

impl Layout {
    pub fn frame(&self, children: Vec<Node>) -> Node {
        Element::new("div")
            .class("mx-auto py-6 lg:py-12 px-6 lg:px-0 max-w-2xl")
            .children(children)
            .into()
    }
}

/// Layouts for standalone pages and posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLayout {
    Default,
    /// Adds a link back to the post index at `root`
    Post { root: String },
}

impl PageLayout {
    /// Pick the layout for a page from its name
    pub fn from_name(name: &str, config: &SiteConfig) -> Option<Self> {
        match name {
            "default" | "page" => Some(PageLayout::Default),
            "post" | "posts" => Some(PageLayout::Post {
                root: config.root.clone(),
            }),
            _ => None,
        }
    }

    fn prose(title: Option<&str>, content: Node) -> Node {
        let heading = title.map(|t| Node::from(Element::new("h1").text(t)));
        Element::new("div")
            .class("prose")
            .children(heading)
            .child(content)
            .into()
    }
}

impl PageShell for PageLayout {
    fn wrap(&self, title: Option<&str>, content: Node) -> Node {
        let body = Self::prose(title, content);
        match self {
            PageLayout::Default => Layout.frame(vec![body]),
            PageLayout::Post { root } => {
                let back = Element::new("div").class("py-3").child(
                    Element::new("a")
                        .class("back-link")
                        .attr("href", url_for(root, ""))
                        .text("\u{2190} Posts"),
                );
                Layout.frame(vec![back.into(), body])
            }
        }
    }
}

/// A complete HTML document around a shell
pub struct Document<'a> {
    config: &'a SiteConfig,
}

impl<'a> Document<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Text for the `<title>` element
    pub fn page_title(&self, title: Option<&str>, meta_title: Option<&str>) -> String {
        match (meta_title, title) {
            (Some(meta), _) => meta.to_string(),
            (None, Some(title)) => format!("{} | {}", title, self.config.title),
            (None, None) => self.config.title.clone(),
        }
    }

    fn head(&self, title: String) -> Element {
        let stylesheets = self.config.head.stylesheets.iter().map(|href| {
            Element::new("link")
                .attr("rel", "stylesheet")
                .attr("href", href.as_str())
        });
        let scripts = self.config.head.scripts.iter().map(|src| {
            Element::new("script")
                .attr("async", "")
                .attr("src", src.as_str())
        });

        Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width, initial-scale=1"),
            )
            .child(Element::new("title").text(title))
            .children(stylesheets)
            .child(Element::new("style").child(Node::Raw(self.config.theme.css_variables())))
            .children(scripts)
    }

    /// Render `body` as a full document
    pub fn render(&self, title: Option<&str>, meta_title: Option<&str>, body: Node) -> String {
        let html: Node = Element::new("html")
            .attr("lang", self.config.language.as_str())
            .child(self.head(self.page_title(title, meta_title)))
            .child(Element::new("body").child(body))
            .into();

        format!("<!DOCTYPE html>\n{}\n", html.to_html())
    }
}
