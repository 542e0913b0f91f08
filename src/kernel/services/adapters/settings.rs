use crate::kernel::services::ports::settings::Settings;
use std::io;
use std::path::{Path, PathBuf};

use super::paths::APP_NAME;

const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(APP_NAME).join(SETTINGS_FILE))
}

/// Writes default settings to `path` unless a file is already there.
pub fn ensure_settings_file_at(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&Settings::default())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn ensure_settings_file() -> io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

pub fn load_settings_from(path: &Path) -> io::Result<Settings> {
    let data = std::fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Settings from the platform config file, created with defaults on first run.
/// Falls back to defaults (with a warning) when the file cannot be used.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match ensure_settings_file() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "settings file unavailable, using defaults");
                return Settings::default();
            }
        },
    };

    match load_settings_from(&path) {
        Ok(settings) => {
            tracing::info!(path = %path.display(), "settings loaded");
            settings
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings, using defaults");
            Settings::default()
        }
    }
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config"));
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
