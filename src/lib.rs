//! novelpad - 终端小说写作编辑器库
//!
//! 模块结构：
//! - models: 数据模型（Article, Document, Selection, markup 编解码）
//! - kernel: 状态、动作、格式化命令、防抖持久化、文章目录、进度计算，以及存储端口与适配器
//! - app: 工作台（把 kernel 与异步运行时连起来）
//! - tui: 终端前端（crossterm + ratatui）

pub mod app;
pub mod kernel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
