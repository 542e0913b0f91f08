//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod paths;
pub mod runtime;
pub mod settings;
pub mod store;

pub use paths::{ensure_documents_dir, ensure_log_dir, get_documents_dir, get_log_dir};
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{ensure_settings_file, get_settings_path, load_settings};
pub use store::{open_store, FileDocumentStore, HttpDocumentStore, MemoryDocumentStore};
