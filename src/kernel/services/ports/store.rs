//! Document store contract: the four operations the editor needs from a backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Article, ArticleId, DEFAULT_TITLE};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(ArticleId),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    pub completed: bool,
}

impl NewDocument {
    pub fn untitled(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            title: DEFAULT_TITLE.to_string(),
            body: String::new(),
            completed: false,
        }
    }
}

/// Partial update; `None` fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "content", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl DocumentPatch {
    pub fn content(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(body) = &self.body {
            article.body = body.clone();
        }
        if let Some(completed) = self.completed {
            article.completed = completed;
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when no document has this id.
    async fn get_document(&self, id: &str) -> StoreResult<Option<Article>>;

    /// Every document of `doc_type`, in the backend's order.
    async fn query(&self, doc_type: &str) -> StoreResult<Vec<Article>>;

    async fn create_document(&self, doc: NewDocument) -> StoreResult<Article>;

    /// Patching a missing id fails with `StoreError::NotFound`.
    async fn patch_document(&self, id: &str, patch: DocumentPatch) -> StoreResult<()>;
}
