//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use chrono::format::{Item, StrftimeItems};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::helpers::moment_to_chrono_format;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,

    // URL
    pub root: String,

    // Directory
    pub content_dir: String,
    pub posts_dir: String,

    #[serde(default)]
    pub posts: PostsConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub head: HeadConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            language: "en".to_string(),

            root: "/".to_string(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),

            posts: PostsConfig::default(),
            highlight: HighlightConfig::default(),
            head: HeadConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Reject settings that would only fail later, at render time
    pub fn validate(&self) -> Result<()> {
        let format = moment_to_chrono_format(&self.posts.date_format);
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid posts.date_format: {}", self.posts.date_format);
        }
        if self.posts.route_prefix.trim_matches('/').is_empty() {
            bail!("posts.route_prefix must not be empty");
        }
        Ok(())
    }
}

/// How the content source orders post records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recent frontmatter date first
    #[default]
    NewestFirst,
    /// Oldest frontmatter date first
    OldestFirst,
    /// Lexical order of slugs
    Path,
}

/// Post listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    /// Path segment posts are published under
    pub route_prefix: String,
    pub order: SortOrder,
    /// Moment.js style display format for post dates
    pub date_format: String,
    /// Maximum number of entries in the recent posts list
    pub recent_limit: Option<usize>,
    /// Text placed between a post title and its date
    pub separator: String,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            route_prefix: "posts".to_string(),
            order: SortOrder::NewestFirst,
            date_format: "MMM, D".to_string(),
            recent_limit: None,
            separator: "\u{2014} ".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Name of a syntect theme
    pub theme: String,
    /// Structural class added to every highlighted block
    pub anchor_class: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            anchor_class: "relative".to_string(),
        }
    }
}

/// Extra tags injected into every document head
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
    pub stylesheets: Vec<String>,
    /// Loaded with `async`, e.g. analytics
    pub scripts: Vec<String>,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            stylesheets: vec![
                "https://fonts.googleapis.com/css2?family=EB+Garamond:wght@400;600&family=Inter:wght@400;700&display=swap"
                    .to_string(),
            ],
            scripts: Vec::new(),
        }
    }
}

/// Visual theme tokens, emitted as CSS custom properties
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub colors: IndexMap<String, String>,
    pub fonts: FontsConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let colors = [
            ("accent", "#f59e0b"),
            ("accent-strong", "#d97706"),
            ("code-background", "#fffbeb"),
            ("muted", "#9ca3af"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            colors,
            fonts: FontsConfig::default(),
        }
    }
}

impl ThemeConfig {
    /// Render the tokens as a `:root` CSS block
    pub fn css_variables(&self) -> String {
        let mut css = String::from(":root{");
        for (name, value) in &self.colors {
            css.push_str(&format!("--color-{}:{};", name, value));
        }
        css.push_str(&format!("--font-sans:{};", self.fonts.sans));
        css.push_str(&format!("--font-serif:{};", self.fonts.serif));
        css.push('}');
        css
    }
}

/// Font families
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub sans: String,
    pub serif: String,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            sans: "Inter".to_string(),
            serif: "'EB Garamond'".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.root, "/");
        assert_eq!(config.posts.route_prefix, "posts");
        assert_eq!(config.posts.order, SortOrder::NewestFirst);
        assert_eq!(config.highlight.anchor_class, "relative");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r##"
title: My Blog
posts:
  order: oldest_first
  recent_limit: 5
highlight:
  theme: InspiredGitHub
theme:
  colors:
    accent: "#000"
"##;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.posts.order, SortOrder::OldestFirst);
        assert_eq!(config.posts.recent_limit, Some(5));
        assert_eq!(config.posts.date_format, "MMM, D");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert_eq!(config.highlight.anchor_class, "relative");
        assert_eq!(config.theme.colors.len(), 1);
    }

    #[test]
    fn test_invalid_date_format() {
        let mut config = SiteConfig::default();
        config.posts.date_format = "YYYY %".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_css_variables() {
        let css = ThemeConfig::default().css_variables();
        assert!(css.starts_with(":root{"));
        assert!(css.contains("--color-accent:#f59e0b;"));
        assert!(css.contains("--font-serif:'EB Garamond';"));
    }
}
