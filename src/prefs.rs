//! Persisted desktop preferences.
//!
//! Exactly two settings survive restarts: theme and language. They live in
//! a small TOML file under the user config dir, saved on every toggle. A
//! missing or damaged file never blocks launch; it just means defaults.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::i18n::Language;
use crate::theme::Theme;

const APP_DIR: &str = "term-folio";
const PREFS_FILE: &str = "prefs.toml";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("no user config directory available")]
    NoConfigDir,
    #[error("failed to write preferences to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    pub theme: Theme,
    pub language: Language,
}

/// Read/write access to the preference file at a fixed location.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: Option<PathBuf>,
}

impl PrefsStore {
    /// `<config_dir>/term-folio/prefs.toml`, or an unsaveable store when
    /// the platform reports no config directory.
    pub fn at_default_location() -> Self {
        Self {
            path: dirs::config_dir().map(|dir| dir.join(APP_DIR).join(PREFS_FILE)),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn load(&self) -> Prefs {
        let Some(path) = &self.path else {
            return Prefs::default();
        };
        match fs::read_to_string(path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(prefs) => prefs,
                Err(err) => {
                    warn!(path = %path.display(), %err, "ignoring malformed preferences");
                    Prefs::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Prefs::default(),
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring unreadable preferences");
                Prefs::default()
            }
        }
    }

    pub fn save(&self, prefs: Prefs) -> Result<(), PrefsError> {
        let Some(path) = &self.path else {
            return Err(PrefsError::NoConfigDir);
        };
        let text = toml::to_string_pretty(&prefs)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PrefsError::Write {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| PrefsError::Write {
            path: path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::at(dir.path().join("nested").join("prefs.toml"));
        let prefs = Prefs {
            theme: Theme::Light,
            language: Language::Hi,
        };
        store.save(prefs).unwrap();
        assert_eq!(store.load(), prefs);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::at(dir.path().join("absent.toml"));
        assert_eq!(store.load(), Prefs::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "theme = 42\nnot even close [").unwrap();
        let store = PrefsStore::at(path);
        assert_eq!(store.load(), Prefs::default());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "theme = \"light\"\n").unwrap();
        let store = PrefsStore::at(path);
        let prefs = store.load();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.language, Language::En);
    }
}
