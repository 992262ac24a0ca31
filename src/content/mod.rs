//! Content module - records, their source, and page bodies

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod record;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::{FsContentSource, SourceFile};
pub use markdown::MarkdownRenderer;
pub use record::{ContentRecord, ContentSource, RecordFrontMatter};
