//! Service ports: traits + data contracts.

pub mod settings;
pub mod store;

pub use settings::{BackendSettings, RetrySettings, Settings};
pub use store::{DocumentPatch, DocumentStore, NewDocument, StoreError, StoreResult};
