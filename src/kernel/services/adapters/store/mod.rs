//! Document store backends.

mod file;
mod http;
mod memory;

pub use file::FileDocumentStore;
pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

use std::sync::Arc;

use super::paths::ensure_documents_dir;
use crate::kernel::services::ports::{BackendSettings, DocumentStore, StoreResult};

/// Builds the backend named in settings.
pub fn open_store(settings: &BackendSettings) -> StoreResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match settings {
        BackendSettings::File { dir } => {
            let dir = match dir {
                Some(dir) => dir.clone(),
                None => ensure_documents_dir()?,
            };
            tracing::info!(dir = %dir.display(), "using file document store");
            Arc::new(FileDocumentStore::new(dir))
        }
        BackendSettings::Http { base_url, token } => {
            tracing::info!(base_url = %base_url, "using http document store");
            Arc::new(HttpDocumentStore::new(base_url.clone(), token.clone())?)
        }
        BackendSettings::Memory => {
            tracing::info!("using in-memory document store");
            Arc::new(MemoryDocumentStore::new())
        }
    };
    Ok(store)
}
