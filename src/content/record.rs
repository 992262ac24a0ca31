//! Content records and the source that supplies them

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ContentError;

/// A published content item as seen by the renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique, URL-path-safe identifier
    pub slug: String,
    pub frontmatter: RecordFrontMatter,
}

/// Front-matter of a record, with the date already formatted for display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub meta_title: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl ContentRecord {
    /// Create a record with a title and display date
    pub fn new(slug: &str, title: &str, date: &str) -> Self {
        Self {
            slug: slug.to_string(),
            frontmatter: RecordFrontMatter {
                title: Some(title.to_string()),
                date: Some(date.to_string()),
                ..Default::default()
            },
        }
    }
}

/// Supplies content records, already in display order
pub trait ContentSource {
    fn records(&self) -> Result<Vec<ContentRecord>, ContentError>;
}

impl ContentSource for [ContentRecord] {
    fn records(&self) -> Result<Vec<ContentRecord>, ContentError> {
        Ok(self.to_vec())
    }
}

impl ContentSource for Vec<ContentRecord> {
    fn records(&self) -> Result<Vec<ContentRecord>, ContentError> {
        self.as_slice().records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_keeps_order() {
        let records = vec![
            ContentRecord::new("b", "B", "Jan 2"),
            ContentRecord::new("a", "A", "Jan 1"),
        ];
        let slugs: Vec<_> = records
            .records()
            .unwrap()
            .into_iter()
            .map(|r| r.slug)
            .collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[test]
    fn test_record_deserialize_keeps_extra() {
        let yaml = r#"
slug: abc
frontmatter:
  title: T
  date: D
  extra: X
"#;
        let record: ContentRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.slug, "abc");
        assert_eq!(record.frontmatter.title.as_deref(), Some("T"));
        assert!(record.frontmatter.extra.contains_key("extra"));
    }
}
