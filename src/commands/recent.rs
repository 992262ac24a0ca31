//! Print the recent posts list

use anyhow::Result;

use crate::Site;

pub fn run(site: &Site) -> Result<()> {
    let source = site.content_source();
    let list = site.recent_posts(&source).render()?;

    if list.is_empty() {
        tracing::info!("No posts found in {:?}", site.posts_dir);
        return Ok(());
    }

    println!("{}", list.to_html());
    Ok(())
}
