use super::*;
use crate::kernel::services::adapters::store::MemoryDocumentStore;
use crate::models::Article;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

fn fast_retry(attempts: u32) -> RetrySettings {
    RetrySettings {
        attempts,
        backoff_ms: 1,
    }
}

/// Fails the first `failures` patches with a transient error.
struct FlakyStore {
    inner: MemoryDocumentStore,
    failures: u32,
    patches: AtomicU32,
}

impl FlakyStore {
    fn new(failures: u32) -> Self {
        Self {
            inner: MemoryDocumentStore::with_articles("novelContent", vec![Article::untitled("a")]),
            failures,
            patches: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn get_document(&self, id: &str) -> StoreResult<Option<crate::models::Article>> {
        self.inner.get_document(id).await
    }

    async fn query(&self, doc_type: &str) -> StoreResult<Vec<crate::models::Article>> {
        self.inner.query(doc_type).await
    }

    async fn create_document(&self, doc: NewDocument) -> StoreResult<crate::models::Article> {
        self.inner.create_document(doc).await
    }

    async fn patch_document(&self, id: &str, patch: DocumentPatch) -> StoreResult<()> {
        let n = self.patches.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.inner.patch_document(id, patch).await
    }
}

fn runtime_with(store: Arc<dyn DocumentStore>, retry: RetrySettings) -> (AsyncRuntime, mpsc::Receiver<AppMessage>) {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx, store, "novelContent", retry).unwrap();
    (runtime, rx)
}

#[test]
fn save_retries_transient_failures() {
    let store = Arc::new(FlakyStore::new(2));
    let (runtime, rx) = runtime_with(store.clone(), fast_retry(3));

    runtime.save(SaveRequest {
        id: "a".to_string(),
        title: "T".to_string(),
        body: "<p>b</p>".to_string(),
    });

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::SaveFinished { id, saved_at } => {
            assert_eq!(id, "a");
            assert!(saved_at.is_some());
        }
        other => panic!("unexpected message: {other:?}"),
    }
    assert_eq!(store.patches.load(Ordering::SeqCst), 3);
}

#[test]
fn save_gives_up_after_configured_attempts() {
    let store = Arc::new(FlakyStore::new(10));
    let (runtime, rx) = runtime_with(store.clone(), fast_retry(2));

    runtime.save(SaveRequest {
        id: "a".to_string(),
        title: "T".to_string(),
        body: String::new(),
    });

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::SaveFinished { saved_at, .. } => assert!(saved_at.is_none()),
        other => panic!("unexpected message: {other:?}"),
    }
    assert_eq!(store.patches.load(Ordering::SeqCst), 2);
}

#[test]
fn retrying_save_never_overwrites_a_newer_one() {
    let store = Arc::new(FlakyStore::new(1));
    let retry = RetrySettings {
        attempts: 3,
        backoff_ms: 300,
    };
    let (runtime, rx) = runtime_with(store.clone(), retry);

    runtime.save(SaveRequest {
        id: "a".to_string(),
        title: "T".to_string(),
        body: "<p>old</p>".to_string(),
    });
    std::thread::sleep(Duration::from_millis(50));
    runtime.save(SaveRequest {
        id: "a".to_string(),
        title: "T".to_string(),
        body: "<p>new</p>".to_string(),
    });

    let mut saved = 0;
    for _ in 0..2 {
        match rx.recv_timeout(WAIT).unwrap() {
            AppMessage::SaveFinished { id, saved_at } => {
                assert_eq!(id, "a");
                saved += usize::from(saved_at.is_some());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
    assert_eq!(saved, 1);

    runtime.fetch_article("a".to_string(), 1);
    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::ArticleFetched { result, .. } => {
            assert_eq!(result.unwrap().body, "<p>new</p>");
        }
        other => panic!("unexpected message: {other:?}"),
    }
    // The failed first write and the newer one; the stale retry is dropped.
    assert_eq!(store.patches.load(Ordering::SeqCst), 2);
}

#[test]
fn missing_document_is_not_retried() {
    let store = Arc::new(MemoryDocumentStore::new());
    let handle = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let result = handle.block_on(patch_with_retry(
        store.as_ref(),
        "ghost",
        DocumentPatch::completed(true),
        fast_retry(5),
        || false,
    ));

    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn fetch_reports_not_found_with_generation() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let (runtime, rx) = runtime_with(store, fast_retry(1));

    runtime.fetch_article("ghost".to_string(), 7);

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::ArticleFetched {
            id,
            generation,
            result,
        } => {
            assert_eq!(id, "ghost");
            assert_eq!(generation, 7);
            assert_eq!(result, Err(LoadError::NotFound("ghost".to_string())));
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn create_then_list_round_trips_through_the_store() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let (runtime, rx) = runtime_with(store, fast_retry(1));

    runtime.create_article();
    let created = match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::ArticleCreated(article) => article,
        other => panic!("unexpected message: {other:?}"),
    };
    assert_eq!(created.title, "Untitled");
    assert_eq!(created.body, "");
    assert!(!created.completed);

    runtime.list_articles();
    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::ArticlesListed(articles) => assert_eq!(articles, vec![created]),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn set_completed_reports_failure_for_unknown_id() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let (runtime, rx) = runtime_with(store, fast_retry(3));

    runtime.set_completed("ghost".to_string(), true);

    match rx.recv_timeout(WAIT).unwrap() {
        AppMessage::CompletedSaved {
            id,
            completed,
            success,
        } => {
            assert_eq!(id, "ghost");
            assert!(completed);
            assert!(!success);
        }
        other => panic!("unexpected message: {other:?}"),
    }
}
