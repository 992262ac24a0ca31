//! Configuration module

mod site;

pub use site::FontsConfig;
pub use site::HeadConfig;
pub use site::HighlightConfig;
pub use site::PostsConfig;
pub use site::SiteConfig;
pub use site::SortOrder;
pub use site::ThemeConfig;
