use serde::{Deserialize, Serialize};

pub type ArticleId = String;

pub const DEFAULT_TITLE: &str = "Untitled";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// One title + body + completed record as the document store holds it.
///
/// The body is markup and travels as `content` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(alias = "_id")]
    pub id: ArticleId,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(rename = "content", default)]
    pub body: String,
    #[serde(default)]
    pub completed: bool,
}

impl Article {
    pub fn untitled(id: impl Into<ArticleId>) -> Self {
        Self {
            id: id.into(),
            title: default_title(),
            body: String::new(),
            completed: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/article.rs"]
mod tests;
