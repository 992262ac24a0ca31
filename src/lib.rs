//! amberpress: render a blog's content into HTML
//!
//! Posts are read from markdown files, code fences are syntax highlighted,
//! and pages are wrapped in a site shell.

pub mod codeblock;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod highlight;
pub mod markup;
pub mod posts;
pub mod shell;

use anyhow::Result;
use std::path::{Path, PathBuf};

use codeblock::CodeBlockRenderer;
use content::{ContentSource, FsContentSource};
use highlight::SyntectHighlighter;
use posts::{PostListRenderer, RecentPosts};

/// A site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
    /// Posts directory
    pub posts_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let posts_dir = content_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            posts_dir,
        })
    }

    /// Post records on disk
    pub fn content_source(&self) -> FsContentSource {
        FsContentSource::new(&self.posts_dir, &self.config.posts)
    }

    /// Code block renderer using the configured theme
    pub fn code_blocks(&self) -> CodeBlockRenderer<SyntectHighlighter> {
        CodeBlockRenderer::new(
            SyntectHighlighter::new(&self.config.highlight.theme),
            &self.config.highlight.anchor_class,
        )
    }

    pub fn post_list(&self) -> PostListRenderer {
        PostListRenderer::from_config(&self.config)
    }

    /// The recent posts list over `source`
    pub fn recent_posts<'a, S>(&self, source: &'a S) -> RecentPosts<'a, S>
    where
        S: ContentSource + ?Sized,
    {
        RecentPosts::new(source, self.post_list()).with_limit(self.config.posts.recent_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Blog");
        assert_eq!(site.posts_dir, dir.path().join("content").join("posts"));
    }

    #[test]
    fn test_site_reads_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "title: Amber\ncontent_dir: src\nposts_dir: blog\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Amber");
        assert_eq!(site.posts_dir, dir.path().join("src").join("blog"));
    }

    #[test]
    fn test_site_recent_posts() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("content").join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-03-05\n---\nBody\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let source = site.content_source();
        let html = site.recent_posts(&source).render().unwrap().to_html();
        assert!(html.contains(r#"href="/posts/hello""#));
        assert!(html.contains("— Mar, 5"));
    }
}
