//! File-backed key-value preference store.
//!
//! The core only needs a plain synchronous read/write contract for small
//! per-user preferences (currently the dark-mode choice), so this stays on
//! blocking `std::fs` rather than joining the async store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PrefStore { path: path.into() }
    }

    /// Reads one preference. A missing file, missing key or unreadable
    /// value all read as `None` — preferences are never load-bearing.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.load().remove(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Ignoring malformed preference '{key}': {e}");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let mut map = self.load();
        map.insert(key.to_string(), serde_json::to_value(value)?);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&map)?)?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut map = self.load();
        if map.remove(key).is_some() {
            std::fs::write(&self.path, serde_json::to_vec_pretty(&map)?)?;
        }
        Ok(())
    }

    pub fn theme_preference(&self) -> ThemePreference {
        self.get(THEME_KEY).unwrap_or(ThemePreference::Light)
    }

    pub fn set_theme_preference(&self, theme: ThemePreference) -> Result<(), AppError> {
        self.set(THEME_KEY, &theme)
    }

    fn load(&self) -> BTreeMap<String, serde_json::Value> {
        let Ok(bytes) = std::fs::read(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    "Preference file {} is unreadable, starting fresh: {e}",
                    self.path.display()
                );
                BTreeMap::new()
            }
        }
    }
}
