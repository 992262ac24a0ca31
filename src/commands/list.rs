//! List posts in display order

use anyhow::Result;

use crate::content::{ContentRecord, ContentSource};
use crate::Site;

/// Print every post record, or the records as JSON
pub fn run(site: &Site, json: bool) -> Result<()> {
    let records = site.content_source().records()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("Posts ({}):", records.len());
    for record in &records {
        println!("  {}", describe(record));
    }

    Ok(())
}

/// One line per record: date, title and slug
fn describe(record: &ContentRecord) -> String {
    let frontmatter = &record.frontmatter;
    format!(
        "{} - {} [{}]",
        frontmatter.date.as_deref().unwrap_or("undated"),
        frontmatter.title.as_deref().unwrap_or("(untitled)"),
        record.slug
    )
}
