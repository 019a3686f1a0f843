//! User preference persistence for the Folio TUI.
//!
//! A tiny JSON-backed store that records the preferred theme and the
//! reduced-motion flag. The file lives in the standard configuration directory
//! (`~/.config/folio/preferences.json` on most platforms) and is safe to share
//! across threads thanks to the internal `Mutex`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{config_file_path, env_flag};

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "FOLIO_PREFERENCES_PATH";

/// Environment variable that forces reduced motion on or off.
pub const REDUCED_MOTION_ENV: &str = "FOLIO_REDUCED_MOTION";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Canonical identifier of the theme last selected.
    #[serde(default)]
    pub preferred_theme: Option<String>,
    /// Skip panel transitions.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Thread-safe preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Opens the store at the default path (honoring `FOLIO_PREFERENCES_PATH`).
    pub fn new() -> Result<Self, PreferencesError> {
        Self::with_path(config_file_path(PREFERENCES_PATH_ENV, PREFERENCES_FILE_NAME))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        debug!(path = %path.display(), "preferences loaded");
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// In-memory store used when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_persistent(&self) -> bool {
        self.persist_to_disk
    }

    pub fn preferred_theme(&self) -> Option<String> {
        self.lock().preferred_theme.clone()
    }

    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        let mut payload = self.lock();
        payload.preferred_theme = theme_id;
        self.save_locked(&payload)
    }

    /// Stored flag only; see [`UserPreferences::effective_reduced_motion`].
    pub fn reduced_motion(&self) -> bool {
        self.lock().reduced_motion
    }

    pub fn set_reduced_motion(&self, reduced_motion: bool) -> Result<(), PreferencesError> {
        let mut payload = self.lock();
        payload.reduced_motion = reduced_motion;
        self.save_locked(&payload)
    }

    /// `FOLIO_REDUCED_MOTION` when set, the stored flag otherwise.
    pub fn effective_reduced_motion(&self) -> bool {
        env_flag(REDUCED_MOTION_ENV).unwrap_or_else(|| self.reduced_motion())
    }

    fn lock(&self) -> MutexGuard<'_, PreferencesPayload> {
        self.payload.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save_locked(&self, payload: &PreferencesPayload) -> Result<(), PreferencesError> {
        if !self.persist_to_disk {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reduced_motion_persists_across_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE_NAME);

        let store = UserPreferences::with_path(&path).unwrap();
        assert!(!store.reduced_motion());
        store.set_reduced_motion(true).unwrap();
        store.set_preferred_theme(Some("paper".into())).unwrap();
        drop(store);

        let reloaded = UserPreferences::with_path(&path).unwrap();
        assert!(reloaded.reduced_motion());
        assert_eq!(reloaded.preferred_theme().as_deref(), Some("paper"));
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let store = UserPreferences::with_path(&path).unwrap();
        assert_eq!(store.preferred_theme(), None);
        assert!(!store.reduced_motion());
    }

    #[test]
    fn older_files_without_reduced_motion_still_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, r#"{ "preferred_theme": "dracula" }"#).unwrap();

        let store = UserPreferences::with_path(&path).unwrap();
        assert_eq!(store.preferred_theme().as_deref(), Some("dracula"));
        assert!(!store.reduced_motion());
    }

    #[test]
    fn environment_overrides_the_stored_flag() {
        let store = UserPreferences::ephemeral();
        store.set_reduced_motion(true).unwrap();
        temp_env::with_var(REDUCED_MOTION_ENV, Some("0"), || assert!(!store.effective_reduced_motion()));
        temp_env::with_var(REDUCED_MOTION_ENV, None::<&str>, || assert!(store.effective_reduced_motion()));
        assert!(!store.is_persistent());
    }

    #[test]
    fn default_path_honors_env_override() {
        let override_path = "~/custom/folio-preferences.json";
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(override_path), || {
            let store = UserPreferences::new().unwrap();
            assert_eq!(store.path(), crate::expand_tilde(override_path));
        });
    }
}
