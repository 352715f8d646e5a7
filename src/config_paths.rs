//! Centralized configuration paths for plaintext-editor
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/plaintext-editor/`
//! - Windows: `%APPDATA%\plaintext-editor\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "plaintext-editor";

/// Base name of the rolling log file
pub const LOG_FILE_PREFIX: &str = "plaintext-editor.log";

/// Base config directory for plaintext-editor
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/plaintext-editor`
///   - Else: `~/.config/plaintext-editor`
///
/// Windows:
///   - `%APPDATA%\plaintext-editor`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/plaintext-editor/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/plaintext-editor/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_config_dir() {
        let Some(dir) = config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(config_file(), Some(dir.join("config.yaml")));
        assert_eq!(logs_dir(), Some(dir.join("logs")));
    }
}
