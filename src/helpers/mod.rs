//! Helper functions shared by the renderers and the content source

mod date;
mod url;

pub use date::*;
pub use url::*;
