use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GOAL: u64 = 70_000;
pub const DEFAULT_DOCUMENT_TYPE: &str = "novelContent";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Word-count goal shown in the footer.
    pub goal: u64,
    pub save_delay_ms: u64,
    pub dark_mode: bool,
    /// Document type the store lists and creates articles under.
    pub document_type: String,
    pub highlight_color: String,
    pub backend: BackendSettings,
    pub retry: RetrySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            save_delay_ms: 800,
            dark_mode: false,
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            highlight_color: crate::models::markup::DEFAULT_MARK_COLOR.to_string(),
            backend: BackendSettings::default(),
            retry: RetrySettings::default(),
        }
    }
}

impl Settings {
    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendSettings {
    /// One JSON file per article under `dir` (platform data dir when unset).
    File {
        #[serde(default)]
        dir: Option<PathBuf>,
    },
    Http {
        base_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
    Memory,
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings::File { dir: None }
    }
}

impl BackendSettings {
    /// Name for logs; never includes the token.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendSettings::File { .. } => "file",
            BackendSettings::Http { .. } => "http",
            BackendSettings::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total tries per write, including the first.
    pub attempts: u32,
    pub backoff_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff_ms: 500,
        }
    }
}

impl RetrySettings {
    /// Linear backoff: the wait before try `attempt + 1`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
