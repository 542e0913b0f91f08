//! Headless application core (state/action/effect).

pub mod action;
pub mod debounce;
pub mod directory;
pub mod effect;
pub mod format;
pub mod progress;
pub mod services;
pub mod state;
pub mod store;
pub mod sync;

pub use action::Action;
pub use directory::ArticleDirectory;
pub use effect::Effect;
pub use format::{BlockFormat, EditCommand, FormatCommand};
pub use state::{AppState, EditorSession, FocusTarget, LoadError, SaveStatus, UiState};
pub use store::{DispatchResult, Store};
pub use sync::{PersistenceGateway, SaveRequest};
