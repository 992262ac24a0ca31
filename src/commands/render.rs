//! Render a markdown page to HTML

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

use crate::content::{ContentSource, MarkdownRenderer, SourceFile};
use crate::markup::Node;
use crate::shell::{Document, PageLayout, PageShell};
use crate::Site;

/// Render `file` and write the result to `output`, or stdout
pub fn run(
    site: &Site,
    file: &Path,
    layout: &str,
    fragment: bool,
    output: Option<&Path>,
) -> Result<()> {
    let page = SourceFile::read(file)?;
    let html = render_page(site, &page, layout, fragment)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Rendered {:?} to {:?}", file, path);
        }
        None => print!("{}", html),
    }

    Ok(())
}

/// Render a page body inside `layout`
///
/// With `fragment` set only the shell is returned, without the surrounding
/// document.
pub fn render_page(
    site: &Site,
    page: &SourceFile,
    layout: &str,
    fragment: bool,
) -> Result<String> {
    let layout = PageLayout::from_name(layout, &site.config)
        .ok_or_else(|| anyhow!("Unknown layout: {}. Available: default, post", layout))?;

    let code_blocks = site.code_blocks();
    let records = site.content_source();
    let source: &dyn ContentSource = &records;
    let markdown =
        MarkdownRenderer::new(&code_blocks).with_recent_posts(site.recent_posts(source));

    let body = markdown.render(&page.body)?;
    let title = page.frontmatter.title.as_deref();
    let content = layout.wrap(title, Node::Raw(body));

    if fragment {
        return Ok(content.to_html());
    }

    let document = Document::new(&site.config);
    Ok(document.render(title, page.frontmatter.meta_title.as_deref(), content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site_with_posts() -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("content").join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("first.md"),
            "---\ntitle: First\ndate: 2024-01-01\n---\nOne\n",
        )
        .unwrap();
        fs::write(
            posts.join("second.md"),
            "---\ntitle: Second\ndate: 2024-02-01\n---\nTwo\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    fn page(markdown: &str) -> SourceFile {
        let (frontmatter, body) = crate::content::FrontMatter::parse(markdown).unwrap();
        SourceFile {
            path: "index.md".into(),
            frontmatter,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_render_index_page() {
        let (_dir, site) = site_with_posts();
        let page = page("---\ntitle: Home\n---\n# Writing\n\n<RecentPosts />\n");

        let html = render_page(&site, &page, "default", false).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Home | Blog</title>"));
        assert!(html.contains(r#"<div class="prose"><h1>Home</h1>"#));

        let second = html.find(r#"href="/posts/second""#).unwrap();
        let first = html.find(r#"href="/posts/first""#).unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_render_post_fragment() {
        let (_dir, site) = site_with_posts();
        let page = page("---\ntitle: A Post\nmetaTitle: Custom\n---\n```rust\nfn main() {}\n```\n");

        let html = render_page(&site, &page, "post", true).unwrap();
        assert!(!html.contains("<html"));
        assert!(html.contains("back-link"));
        assert!(html.contains(r#"<pre class="relative highlight language-rust""#));
        assert!(html.contains("token-line"));
    }

    #[test]
    fn test_render_meta_title() {
        let (_dir, site) = site_with_posts();
        let page = page("---\ntitle: A Post\nmetaTitle: Custom\n---\nBody\n");
        let html = render_page(&site, &page, "post", false).unwrap();
        assert!(html.contains("<title>Custom</title>"));
    }

    #[test]
    fn test_unknown_layout() {
        let (_dir, site) = site_with_posts();
        assert!(render_page(&site, &page("Body"), "gallery", true).is_err());
    }

    #[test]
    fn test_run_writes_output() {
        let (dir, site) = site_with_posts();
        let input = dir.path().join("about.md");
        fs::write(&input, "---\ntitle: About\n---\nHi\n").unwrap();
        let output = dir.path().join("public").join("about.html");

        run(&site, &input, "default", false, Some(&output)).unwrap();
        let html = fs::read_to_string(output).unwrap();
        assert!(html.contains("<p>Hi</p>"));
    }
}
