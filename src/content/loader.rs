//! Content loader - reads post records from the posts directory

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, ContentRecord, ContentSource, FrontMatter, RecordFrontMatter};
use crate::config::{PostsConfig, SortOrder};
use crate::helpers::format_date;

/// A content file split into front-matter and body
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub frontmatter: FrontMatter,
    pub body: String,
}

impl SourceFile {
    /// Read and split a content file
    pub fn read(path: &Path) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (frontmatter, body) =
            FrontMatter::parse(&content).map_err(|e| ContentError::FrontMatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            body: body.to_string(),
            frontmatter,
        })
    }
}

/// Reads post records from a directory of markdown files
pub struct FsContentSource {
    posts_dir: PathBuf,
    order: SortOrder,
    date_format: String,
}

impl FsContentSource {
    /// Create a source over `posts_dir`
    pub fn new<P: AsRef<Path>>(posts_dir: P, config: &PostsConfig) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            order: config.order,
            date_format: config.date_format.clone(),
        }
    }

    /// Directory this source reads from
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Load a single record, along with its parsed date for ordering
    fn load_record(
        &self,
        path: &Path,
    ) -> Result<(Option<NaiveDateTime>, ContentRecord), ContentError> {
        let file = SourceFile::read(path)?;
        let slug = slug_for(&self.posts_dir, path).ok_or_else(|| ContentError::FrontMatter {
            path: path.to_path_buf(),
            message: "cannot derive a slug from the file path".to_string(),
        })?;

        let parsed = file.frontmatter.parse_date();
        let date = match parsed {
            Some(dt) => format_date(&dt, &self.date_format).or(file.frontmatter.date),
            None => file.frontmatter.date,
        };

        let record = ContentRecord {
            slug,
            frontmatter: RecordFrontMatter {
                title: file.frontmatter.title,
                date,
                meta_title: file.frontmatter.meta_title,
                extra: file.frontmatter.extra,
            },
        };

        Ok((parsed, record))
    }
}

impl ContentSource for FsContentSource {
    fn records(&self) -> Result<Vec<ContentRecord>, ContentError> {
        if !self.posts_dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", self.posts_dir);
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.posts_dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_content_file(path) {
                continue;
            }

            match self.load_record(path) {
                // Slugs are unique; the first file in walk order wins
                Ok(loaded) if !seen.insert(loaded.1.slug.clone()) => {
                    tracing::warn!("Skipping {:?}: duplicate slug {:?}", path, loaded.1.slug);
                }
                Ok(loaded) => entries.push(loaded),
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                }
            }
        }

        match self.order {
            SortOrder::NewestFirst => entries.sort_by(|a, b| {
                compare_dates(a.0, b.0, true).then_with(|| a.1.slug.cmp(&b.1.slug))
            }),
            SortOrder::OldestFirst => entries.sort_by(|a, b| {
                compare_dates(a.0, b.0, false).then_with(|| a.1.slug.cmp(&b.1.slug))
            }),
            SortOrder::Path => entries.sort_by(|a, b| a.1.slug.cmp(&b.1.slug)),
        }

        tracing::debug!("Loaded {} records from {:?}", entries.len(), self.posts_dir);

        Ok(entries.into_iter().map(|(_, record)| record).collect())
    }
}

/// Order two optional dates; undated records always sort last
fn compare_dates(
    a: Option<NaiveDateTime>,
    b: Option<NaiveDateTime>,
    newest_first: bool,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Check if a file is a markdown or MDX file
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "mdx" | "markdown"))
        .unwrap_or(false)
}

/// Slug from the path relative to the posts directory
///
/// `hello.md` becomes `hello`, `notes/index.mdx` becomes `notes/`.
pub fn slug_for(posts_dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(posts_dir).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;

    let slug = match parts.split_last() {
        Some((&"index", dirs)) if !dirs.is_empty() => format!("{}/", dirs.join("/")),
        Some((&"index", _)) => return None,
        _ => parts.join("/"),
    };

    (!slug.is_empty()).then_some(slug)
}
