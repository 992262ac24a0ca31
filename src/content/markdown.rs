//! Markdown page bodies, with code blocks and shortcodes rendered by this crate

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::{NoExpand, Regex};

use super::{ContentError, ContentSource};
use crate::codeblock::{CodeBlockRenderer, CodeFenceProps};
use crate::highlight::Highlighter;
use crate::posts::RecentPosts;

lazy_static! {
    static ref RECENT_POSTS_TAG: Regex =
        Regex::new(r"<RecentPosts\s*(/>|>\s*</RecentPosts>)").unwrap();
}

/// Markdown renderer that routes code blocks through a [`CodeBlockRenderer`]
pub struct MarkdownRenderer<'a, H> {
    code_blocks: &'a CodeBlockRenderer<H>,
    recent_posts: Option<RecentPosts<'a, dyn ContentSource + 'a>>,
}

impl<'a, H: Highlighter> MarkdownRenderer<'a, H> {
    /// Create a renderer with no shortcodes
    pub fn new(code_blocks: &'a CodeBlockRenderer<H>) -> Self {
        Self {
            code_blocks,
            recent_posts: None,
        }
    }

    /// Expand `<RecentPosts />` with the given list
    pub fn with_recent_posts(
        mut self,
        recent_posts: RecentPosts<'a, dyn ContentSource + 'a>,
    ) -> Self {
        self.recent_posts = Some(recent_posts);
        self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String, ContentError> {
        // Front-matter is split off by FrontMatter::parse before we get here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // Some(language) while inside a code block
        let mut code_block_lang: Option<Option<String>> = None;
        let mut code_block_content = String::new();
        let mut recent_posts_html: Option<String> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block_lang = Some(fence_language(&kind));
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block_lang.take().flatten();
                    let props = CodeFenceProps::fenced(lang.as_deref(), &code_block_content);
                    let highlighted = self.code_blocks.render(&props).to_html();
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if code_block_lang.is_some() => {
                    code_block_content.push_str(&text);
                }
                Event::Html(text) => {
                    let text = self.expand_shortcodes(text, &mut recent_posts_html)?;
                    events.push(Event::Html(text));
                }
                Event::InlineHtml(text) => {
                    let text = self.expand_shortcodes(text, &mut recent_posts_html)?;
                    events.push(Event::InlineHtml(text));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Replace shortcode tags in a raw HTML fragment
    ///
    /// The list is rendered at most once per page, on first use.
    fn expand_shortcodes<'t>(
        &self,
        text: CowStr<'t>,
        cached: &mut Option<String>,
    ) -> Result<CowStr<'t>, ContentError> {
        if !RECENT_POSTS_TAG.is_match(&text) {
            return Ok(text);
        }

        if cached.is_none() {
            let list = match &self.recent_posts {
                Some(recent_posts) => recent_posts.render()?.to_html(),
                None => {
                    tracing::warn!("<RecentPosts /> used but no content source is configured");
                    String::new()
                }
            };
            *cached = Some(list);
        }
        let list = cached.as_deref().unwrap_or_default();

        let expanded = RECENT_POSTS_TAG.replace_all(&text, NoExpand(list)).into_owned();
        Ok(CowStr::from(expanded))
    }
}

/// Language of a code block: the first word of a fence's info string
fn fence_language(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRecord;
    use crate::highlight::PlainHighlighter;
    use crate::posts::PostListRenderer;

    fn code_blocks() -> CodeBlockRenderer<PlainHighlighter> {
        CodeBlockRenderer::new(PlainHighlighter, "relative")
    }

    #[test]
    fn test_render_basic_markdown() {
        let code_blocks = code_blocks();
        let renderer = MarkdownRenderer::new(&code_blocks);
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_fenced_code_block() {
        let code_blocks = code_blocks();
        let renderer = MarkdownRenderer::new(&code_blocks);
        let html = renderer
            .render("```js title=\"a.js\"\nconst x = 1;\n```\n")
            .unwrap();
        assert!(html.contains(
            r#"<pre class="relative highlight language-js"><div class="token-line"><span class="token plain">const x = 1;</span></div></pre>"#
        ));
    }

    #[test]
    fn test_render_indented_code_block() {
        let code_blocks = code_blocks();
        let renderer = MarkdownRenderer::new(&code_blocks);
        let html = renderer.render("Text\n\n    a < b\n    c\n").unwrap();
        assert!(html.contains(r#"<pre class="relative highlight">"#));
        assert!(html.contains("a &lt; b"));
        assert_eq!(html.matches("token-line").count(), 2);
    }

    #[test]
    fn test_recent_posts_shortcode() {
        let code_blocks = code_blocks();
        let records = vec![
            ContentRecord::new("b", "Second", "Jan 2"),
            ContentRecord::new("a", "First", "Jan 1"),
        ];
        let source: &dyn ContentSource = &records;
        let recent = RecentPosts::new(source, PostListRenderer::default());
        let renderer = MarkdownRenderer::new(&code_blocks).with_recent_posts(recent);

        let html = renderer
            .render("## Posts\n\n<RecentPosts />\n\nInline <RecentPosts/> too.\n")
            .unwrap();
        assert!(!html.contains("RecentPosts"));
        assert_eq!(html.matches(r#"<ul class="post-list">"#).count(), 2);

        let second = html.find(r#"href="/posts/b""#).unwrap();
        let first = html.find(r#"href="/posts/a""#).unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_recent_posts_shortcode_without_source() {
        let code_blocks = code_blocks();
        let renderer = MarkdownRenderer::new(&code_blocks);
        let html = renderer.render("<RecentPosts />\n").unwrap();
        assert!(!html.contains("RecentPosts"));
    }

    #[test]
    fn test_fence_language() {
        let kind = CodeBlockKind::Fenced(CowStr::from("rust ignore"));
        assert_eq!(fence_language(&kind).as_deref(), Some("rust"));
        assert_eq!(fence_language(&CodeBlockKind::Fenced(CowStr::from(""))), None);
        assert_eq!(fence_language(&CodeBlockKind::Indented), None);
    }
}
