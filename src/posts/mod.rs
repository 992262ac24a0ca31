//! Post summaries and the recent posts list

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentRecord, ContentSource};
use crate::helpers::post_url;
use crate::markup::{Element, Node};

/// The part of a record a post list displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub frontmatter: SummaryFrontMatter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryFrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
}

/// Project a record onto its summary; every other field is dropped
pub fn to_summary(record: &ContentRecord) -> PostSummary {
    PostSummary {
        slug: record.slug.clone(),
        frontmatter: SummaryFrontMatter {
            title: record.frontmatter.title.clone(),
            date: record.frontmatter.date.clone(),
        },
    }
}

/// Renders summaries as a list of links
#[derive(Debug, Clone)]
pub struct PostListRenderer {
    root: String,
    route_prefix: String,
    separator: String,
}

impl Default for PostListRenderer {
    fn default() -> Self {
        Self {
            root: "/".to_string(),
            route_prefix: "posts".to_string(),
            separator: "\u{2014} ".to_string(),
        }
    }
}

impl PostListRenderer {
    pub fn new(root: &str, route_prefix: &str, separator: &str) -> Self {
        Self {
            root: root.to_string(),
            route_prefix: route_prefix.to_string(),
            separator: separator.to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            &config.root,
            &config.posts.route_prefix,
            &config.posts.separator,
        )
    }

    /// Render one entry per summary, in the given order
    ///
    /// An empty slice renders nothing.
    pub fn render_list(&self, summaries: &[PostSummary]) -> Node {
        if summaries.is_empty() {
            return Node::Empty;
        }

        Element::new("ul")
            .class("post-list")
            .children(summaries.iter().map(|summary| self.render_entry(summary)))
            .into()
    }

    fn render_entry(&self, summary: &PostSummary) -> Element {
        let title = summary.frontmatter.title.as_deref().unwrap_or_default();
        let date = summary.frontmatter.date.as_deref().unwrap_or_default();

        Element::new("li")
            .class("post-list-item")
            .child(
                Element::new("a")
                    .class("post-list-link")
                    .attr("href", post_url(&self.root, &self.route_prefix, &summary.slug))
                    .text(title),
            )
            .child(
                Element::new("span")
                    .class("post-list-date")
                    .text(format!("{}{}", self.separator, date)),
            )
    }
}

/// The recent posts list, fed by an injected content source
pub struct RecentPosts<'a, S: ?Sized> {
    source: &'a S,
    renderer: PostListRenderer,
    limit: Option<usize>,
}

impl<'a, S: ContentSource + ?Sized> RecentPosts<'a, S> {
    pub fn new(source: &'a S, renderer: PostListRenderer) -> Self {
        Self {
            source,
            renderer,
            limit: None,
        }
    }

    /// Show at most `limit` posts
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Summaries in source order
    pub fn summaries(&self) -> Result<Vec<PostSummary>, ContentError> {
        let records = self.source.records()?;
        let limit = self.limit.unwrap_or(records.len());
        Ok(records.iter().take(limit).map(to_summary).collect())
    }

    pub fn render(&self) -> Result<Node, ContentError> {
        let summaries = self.summaries()?;
        tracing::debug!("Rendering {} recent posts", summaries.len());
        Ok(self.renderer.render_list(&summaries))
    }
}
