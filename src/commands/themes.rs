//! List the available highlight themes

use anyhow::Result;

use crate::highlight::available_themes;
use crate::Site;

pub fn run(site: &Site) -> Result<()> {
    for theme in available_themes() {
        let marker = if theme == site.config.highlight.theme {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, theme);
    }
    Ok(())
}
