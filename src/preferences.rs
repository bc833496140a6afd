//! Dark-mode preference persisted to client-local storage
//!
//! On native targets the flag lives in `<storage dir>/isDarkMode.json`; on
//! wasm it is kept in a process-wide map for the lifetime of the page.

use crate::types::ThemeMode;
use std::path::PathBuf;

#[cfg(target_arch = "wasm32")]
use once_cell::sync::Lazy;
#[cfg(target_arch = "wasm32")]
use std::{collections::HashMap, sync::Mutex};

#[cfg(not(target_arch = "wasm32"))]
use std::fs;

/// Storage key for the dark-mode flag.
pub const DARK_MODE_KEY: &str = "isDarkMode";

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("failed to write preference: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize preference: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("preference storage unavailable")]
    Unavailable,
}

#[cfg(target_arch = "wasm32")]
static PAGE_STORAGE: Lazy<Mutex<HashMap<String, String>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

#[derive(Clone, Debug, PartialEq)]
pub struct PreferenceStore {
    storage_dir: PathBuf,
    is_dark_mode: bool,
}

impl PreferenceStore {
    /// Reads the persisted flag once. Missing or unparsable values mean light
    /// mode.
    pub fn load(storage_dir: impl Into<PathBuf>) -> Self {
        let storage_dir = storage_dir.into();
        let is_dark_mode = read_raw(&storage_dir, DARK_MODE_KEY)
            .and_then(|raw| serde_json::from_str::<bool>(raw.trim()).ok())
            .unwrap_or(false);
        Self {
            storage_dir,
            is_dark_mode,
        }
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    pub fn theme(&self) -> ThemeMode {
        ThemeMode::from_dark_flag(self.is_dark_mode)
    }

    /// Flips the flag and persists it. The in-memory value changes even when
    /// the write fails.
    pub fn toggle(&mut self) -> Result<bool, PreferenceError> {
        self.set(!self.is_dark_mode)?;
        Ok(self.is_dark_mode)
    }

    pub fn set(&mut self, is_dark_mode: bool) -> Result<(), PreferenceError> {
        if self.is_dark_mode == is_dark_mode {
            return Ok(());
        }
        self.is_dark_mode = is_dark_mode;
        let serialized = serde_json::to_string(&is_dark_mode)?;
        write_raw(&self.storage_dir, DARK_MODE_KEY, &serialized)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_raw(storage_dir: &std::path::Path, key: &str) -> Option<String> {
    fs::read_to_string(storage_dir.join(format!("{}.json", sanitize_key(key)))).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(storage_dir: &std::path::Path, key: &str, value: &str) -> Result<(), PreferenceError> {
    fs::create_dir_all(storage_dir)?;
    fs::write(
        storage_dir.join(format!("{}.json", sanitize_key(key))),
        value,
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn read_raw(_storage_dir: &std::path::Path, key: &str) -> Option<String> {
    let storage = PAGE_STORAGE.lock().ok()?;
    storage.get(key).cloned()
}

#[cfg(target_arch = "wasm32")]
fn write_raw(_storage_dir: &std::path::Path, key: &str, value: &str) -> Result<(), PreferenceError> {
    let mut storage = PAGE_STORAGE
        .lock()
        .map_err(|_| PreferenceError::Unavailable)?;
    storage.insert(key.to_string(), value.to_string());
    Ok(())
}

/// Sanitize storage key for filesystem use
#[cfg(not(target_arch = "wasm32"))]
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}
