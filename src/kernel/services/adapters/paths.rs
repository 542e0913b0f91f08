//! Platform directories.
//!
//! - macOS: ~/Library/Application Support/novelpad/{documents,logs}
//! - Linux: $XDG_DATA_HOME/novelpad or ~/.local/share/novelpad
//! - Windows: %APPDATA%\novelpad

use std::io;
use std::path::PathBuf;

pub(crate) const APP_NAME: &str = "novelpad";
const DOCUMENTS_DIR: &str = "documents";
const LOG_DIR: &str = "logs";

/// Per-user data directory for novelpad.
pub fn get_app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_NAME)
        })
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            Some(PathBuf::from(xdg).join(APP_NAME))
        } else {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
        }
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

/// Default directory of the file backend.
pub fn get_documents_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(DOCUMENTS_DIR))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("Cannot determine {what} directory"),
        )
    })?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Creates the log directory if missing.
pub fn ensure_log_dir() -> io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

pub fn ensure_documents_dir() -> io::Result<PathBuf> {
    ensure_dir(get_documents_dir(), "documents")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
