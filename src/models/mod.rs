//! Data models: articles, the rich-text document tree, selections and the markup codec.

pub mod article;
pub mod document;
pub mod markup;
pub mod selection;

pub use article::{Article, ArticleId, DEFAULT_TITLE};
pub use document::{Block, BlockKind, Document, HeadingLevel, InlineStyle, ListKind, Run};
pub use selection::{Selection, TextPosition};
