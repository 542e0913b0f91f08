//! 应用层：工作台（无终端的核心循环）以及终端主题。

#[cfg(feature = "tui")]
pub mod theme;
pub mod workbench;

pub use workbench::Workbench;
