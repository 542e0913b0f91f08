use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::kernel::services::ports::{
    DocumentPatch, DocumentStore, NewDocument, StoreError, StoreResult,
};
use crate::models::Article;

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    /// `(doc_type, article)` in insertion order.
    docs: Vec<(String, Article)>,
}

/// In-process store; ids are `doc-1`, `doc-2`, ... and listing keeps insertion order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: Mutex<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(doc_type: &str, articles: Vec<Article>) -> Self {
        let docs = articles
            .into_iter()
            .map(|article| (doc_type.to_string(), article))
            .collect::<Vec<_>>();
        Self {
            inner: Mutex::new(Inner {
                next_id: docs.len() as u64,
                docs,
            }),
        }
    }

    pub async fn snapshot(&self) -> Vec<Article> {
        let inner = self.inner.lock().await;
        inner.docs.iter().map(|(_, article)| article.clone()).collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, id: &str) -> StoreResult<Option<Article>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .docs
            .iter()
            .find(|(_, article)| article.id == id)
            .map(|(_, article)| article.clone()))
    }

    async fn query(&self, doc_type: &str) -> StoreResult<Vec<Article>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .docs
            .iter()
            .filter(|(ty, _)| ty == doc_type)
            .map(|(_, article)| article.clone())
            .collect())
    }

    async fn create_document(&self, doc: NewDocument) -> StoreResult<Article> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let article = Article {
            id: format!("doc-{}", inner.next_id),
            title: doc.title,
            body: doc.body,
            completed: doc.completed,
        };
        inner.docs.push((doc.doc_type, article.clone()));
        Ok(article)
    }

    async fn patch_document(&self, id: &str, patch: DocumentPatch) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let (_, article) = inner
            .docs
            .iter_mut()
            .find(|(_, article)| article.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply_to(article);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/store/memory.rs"]
mod tests;
