//! Highlight a single source file as one code block

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::codeblock::CodeFenceProps;
use crate::Site;

pub fn run(site: &Site, file: &Path, lang: Option<&str>) -> Result<()> {
    let source =
        fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    println!("{}", highlight_source(site, &source, lang, file));
    Ok(())
}

/// Render `source` as a fenced block; the language defaults to the file
/// extension
fn highlight_source(site: &Site, source: &str, lang: Option<&str>, file: &Path) -> String {
    let lang = lang.or_else(|| file.extension().and_then(|e| e.to_str()));
    tracing::debug!("Highlighting {:?} as {:?}", file, lang);

    let props = CodeFenceProps::fenced(lang, source);
    site.code_blocks().render(&props).to_html()
}
