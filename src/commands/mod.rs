//! CLI commands

pub mod highlight;
pub mod list;
pub mod recent;
pub mod render;
pub mod themes;
