//! One JSON file per document under a data directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::kernel::services::ports::{
    DocumentPatch, DocumentStore, NewDocument, StoreError, StoreResult,
};
use crate::models::Article;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredDocument {
    #[serde(rename = "type")]
    doc_type: String,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    article: Article,
}

pub struct FileDocumentStore {
    dir: PathBuf,
    /// Serializes read-modify-write cycles on patch.
    write_lock: Mutex<()>,
}

impl FileDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        let valid = !id.is_empty()
            && !id.contains(['/', '\\'])
            && id != "."
            && id != "..";
        valid.then(|| self.dir.join(format!("{id}.json")))
    }

    async fn read(&self, path: &Path) -> StoreResult<Option<StoredDocument>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &Path, doc: &StoredDocument) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn get_document(&self, id: &str) -> StoreResult<Option<Article>> {
        let Some(path) = self.path_for(id) else {
            return Ok(None);
        };
        Ok(self.read(&path).await?.map(|doc| doc.article))
    }

    async fn query(&self, doc_type: &str) -> StoreResult<Vec<Article>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut docs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read(&path).await {
                Ok(Some(doc)) if doc.doc_type == doc_type => docs.push(doc),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document");
                }
            }
        }

        docs.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.article.id.cmp(&b.article.id))
        });
        Ok(docs.into_iter().map(|doc| doc.article).collect())
    }

    async fn create_document(&self, doc: NewDocument) -> StoreResult<Article> {
        let article = Article {
            id: uuid::Uuid::new_v4().to_string(),
            title: doc.title,
            body: doc.body,
            completed: doc.completed,
        };
        let stored = StoredDocument {
            doc_type: doc.doc_type,
            created_at: Utc::now(),
            article,
        };
        let path = self
            .path_for(&stored.article.id)
            .ok_or_else(|| StoreError::Unavailable("generated an invalid id".to_string()))?;

        let _guard = self.write_lock.lock().await;
        self.write(&path, &stored).await?;
        Ok(stored.article)
    }

    async fn patch_document(&self, id: &str, patch: DocumentPatch) -> StoreResult<()> {
        let path = self
            .path_for(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let _guard = self.write_lock.lock().await;
        let mut stored = self
            .read(&path)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply_to(&mut stored.article);
        self.write(&path, &stored).await
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/store/file.rs"]
mod tests;
