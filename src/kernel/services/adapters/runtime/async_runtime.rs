use super::message::AppMessage;
use crate::kernel::services::ports::{
    DocumentPatch, DocumentStore, NewDocument, RetrySettings, StoreError, StoreResult,
};
use crate::kernel::state::LoadError;
use crate::kernel::sync::SaveRequest;
use crate::models::ArticleId;
use rustc_hash::FxHashMap;
use std::io;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

/// Runs store calls on tokio workers; every call answers with exactly one `AppMessage`.
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    store: Arc<dyn DocumentStore>,
    document_type: String,
    retry: RetrySettings,
    lanes: Arc<WriteLanes>,
}

impl AsyncRuntime {
    pub fn new(
        tx: Sender<AppMessage>,
        store: Arc<dyn DocumentStore>,
        document_type: impl Into<String>,
        retry: RetrySettings,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self {
            runtime,
            tx,
            store,
            document_type: document_type.into(),
            retry,
            lanes: Arc::new(WriteLanes::default()),
        })
    }

    pub fn list_articles(&self) {
        let tx = self.tx.clone();
        let store = Arc::clone(&self.store);
        let doc_type = self.document_type.clone();
        self.runtime.spawn(async move {
            let message = match store.query(&doc_type).await {
                Ok(articles) => {
                    tracing::debug!(count = articles.len(), "articles listed");
                    AppMessage::ArticlesListed(articles)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to list articles");
                    AppMessage::ArticlesListFailed {
                        error: e.to_string(),
                    }
                }
            };
            let _ = tx.send(message);
        });
    }

    pub fn fetch_article(&self, id: ArticleId, generation: u64) {
        let tx = self.tx.clone();
        let store = Arc::clone(&self.store);
        self.runtime.spawn(async move {
            let result = match store.get_document(&id).await {
                Ok(Some(article)) => Ok(article),
                Ok(None) => Err(LoadError::NotFound(id.clone())),
                Err(e) => {
                    tracing::warn!(article = %id, error = %e, "failed to fetch article");
                    Err(load_error(&id, e))
                }
            };
            let _ = tx.send(AppMessage::ArticleFetched {
                id,
                generation,
                result,
            });
        });
    }

    pub fn create_article(&self) {
        let tx = self.tx.clone();
        let store = Arc::clone(&self.store);
        let doc = NewDocument::untitled(self.document_type.clone());
        self.runtime.spawn(async move {
            let message = match store.create_document(doc).await {
                Ok(article) => {
                    tracing::info!(article = %article.id, "article created");
                    AppMessage::ArticleCreated(article)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to create article");
                    AppMessage::CreateFailed {
                        error: e.to_string(),
                    }
                }
            };
            let _ = tx.send(message);
        });
    }

    /// Writes a coalesced title/body pair to the id it was scheduled for.
    ///
    /// Writes for one id run one at a time in submission order; a write that a
    /// newer one for the same id has replaced is dropped, retries included.
    pub fn save(&self, request: SaveRequest) {
        let tx = self.tx.clone();
        let store = Arc::clone(&self.store);
        let retry = self.retry;
        let ticket = self.lanes.enter(&request.id);
        self.runtime.spawn(async move {
            let SaveRequest { id, title, body } = request;
            let _turn = ticket.turn.lock().await;
            let patch = DocumentPatch::content(title, body);
            let superseded = || ticket.is_superseded();
            let saved_at =
                match patch_with_retry(store.as_ref(), &id, patch, retry, superseded).await {
                    Ok(true) => {
                        tracing::debug!(article = %id, "article saved");
                        Some(chrono::Local::now())
                    }
                    Ok(false) => {
                        tracing::debug!(article = %id, "save superseded by a newer edit");
                        None
                    }
                    Err(e) => {
                        tracing::warn!(article = %id, error = %e, "failed to save article");
                        None
                    }
                };
            let _ = tx.send(AppMessage::SaveFinished { id, saved_at });
        });
    }

    pub fn set_completed(&self, id: ArticleId, completed: bool) {
        let tx = self.tx.clone();
        let store = Arc::clone(&self.store);
        let retry = self.retry;
        self.runtime.spawn(async move {
            let patch = DocumentPatch::completed(completed);
            let success = match patch_with_retry(store.as_ref(), &id, patch, retry, || false).await {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(article = %id, completed, error = %e, "failed to update completed flag");
                    false
                }
            };
            let _ = tx.send(AppMessage::CompletedSaved {
                id,
                completed,
                success,
            });
        });
    }
}

fn load_error(id: &str, err: StoreError) -> LoadError {
    if err.is_not_found() {
        LoadError::NotFound(id.to_string())
    } else {
        LoadError::Unavailable(err.to_string())
    }
}

/// Per-id ordering of content writes.
#[derive(Default)]
struct WriteLanes {
    lanes: Mutex<FxHashMap<ArticleId, Lane>>,
}

struct Lane {
    latest: u64,
    turn: Arc<tokio::sync::Mutex<()>>,
}

/// A queued write's place in its id's lane.
struct WriteTicket {
    id: ArticleId,
    seq: u64,
    turn: Arc<tokio::sync::Mutex<()>>,
    lanes: Arc<WriteLanes>,
}

impl WriteLanes {
    fn enter(self: &Arc<Self>, id: &ArticleId) -> WriteTicket {
        let (seq, turn) = match self.lanes.lock() {
            Ok(mut lanes) => {
                let lane = lanes.entry(id.clone()).or_insert_with(|| Lane {
                    latest: 0,
                    turn: Arc::new(tokio::sync::Mutex::new(())),
                });
                lane.latest += 1;
                (lane.latest, Arc::clone(&lane.turn))
            }
            Err(_) => (0, Arc::new(tokio::sync::Mutex::new(()))),
        };
        WriteTicket {
            id: id.clone(),
            seq,
            turn,
            lanes: Arc::clone(self),
        }
    }
}

impl WriteTicket {
    fn is_superseded(&self) -> bool {
        let Ok(lanes) = self.lanes.lanes.lock() else {
            return false;
        };
        lanes
            .get(&self.id)
            .is_some_and(|lane| lane.latest > self.seq)
    }
}

/// Bounded retry with linear backoff. A missing document is final.
///
/// `superseded` is checked before every attempt; `Ok(false)` means the write
/// was dropped in favour of a newer one and never reached the store.
pub(crate) async fn patch_with_retry(
    store: &dyn DocumentStore,
    id: &str,
    patch: DocumentPatch,
    retry: RetrySettings,
    superseded: impl Fn() -> bool,
) -> StoreResult<bool> {
    let attempts = retry.attempts.max(1);
    let mut attempt = 1;
    loop {
        if superseded() {
            return Ok(false);
        }
        match store.patch_document(id, patch.clone()).await {
            Ok(()) => return Ok(true),
            Err(e) if e.is_not_found() || attempt >= attempts => return Err(e),
            Err(e) => {
                tracing::debug!(article = %id, attempt, error = %e, "write failed, retrying");
                tokio::time::sleep(retry.backoff(attempt)).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
