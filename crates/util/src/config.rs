//! Shell configuration file.
//!
//! `shell.json` tunes how the navigation shell behaves and how wide it is.
//! Every field is optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use folio_types::SubmenuPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config_file_path;

/// Environment variable overriding the shell configuration path.
pub const SHELL_CONFIG_ENV: &str = "FOLIO_SHELL_CONFIG";

pub const SHELL_CONFIG_FILE_NAME: &str = "shell.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid shell configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// How route changes treat a manually toggled submenu.
    pub submenu_policy: SubmenuPolicy,
    /// Terminal width (columns) at which the viewport counts as wide.
    pub breakpoint_columns: u16,
    /// Sidebar width on wide viewports.
    pub wide_panel_columns: u16,
    /// Sidebar width on narrow viewports.
    pub narrow_panel_columns: u16,
    /// Duration of the intro/sidebar transition in milliseconds.
    pub transition_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            submenu_policy: SubmenuPolicy::default(),
            breakpoint_columns: 100,
            wide_panel_columns: 32,
            narrow_panel_columns: 24,
            transition_ms: 300,
        }
    }
}

impl ShellConfig {
    /// Loads from `FOLIO_SHELL_CONFIG` or the default location. Unreadable
    /// or invalid files are logged and replaced by defaults.
    pub fn load() -> Self {
        let path = default_config_path();
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Ignoring shell configuration; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "shell configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.narrow_panel_columns == 0 || self.wide_panel_columns == 0 {
            return Err(ConfigError::Invalid("panel widths must be at least one column".into()));
        }
        if self.narrow_panel_columns > self.wide_panel_columns {
            return Err(ConfigError::Invalid(format!(
                "narrow_panel_columns ({}) exceeds wide_panel_columns ({})",
                self.narrow_panel_columns, self.wide_panel_columns
            )));
        }
        if self.wide_panel_columns >= self.breakpoint_columns {
            return Err(ConfigError::Invalid(format!(
                "wide_panel_columns ({}) must be smaller than breakpoint_columns ({})",
                self.wide_panel_columns, self.breakpoint_columns
            )));
        }
        Ok(())
    }
}

/// Returns the default path for the shell configuration file.
pub fn default_config_path() -> PathBuf {
    config_file_path(SHELL_CONFIG_ENV, SHELL_CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = ShellConfig::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SHELL_CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "submenu_policy": "persist-toggle", "transition_ms": 0 }"#).unwrap();

        let config = ShellConfig::load_from_path(&path).unwrap();
        assert_eq!(config.submenu_policy, SubmenuPolicy::PersistToggle);
        assert_eq!(config.transition_ms, 0);
        assert_eq!(config.breakpoint_columns, 100);
    }

    #[test]
    fn inconsistent_widths_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SHELL_CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "narrow_panel_columns": 40, "wide_panel_columns": 30 }"#).unwrap();
        assert!(matches!(ShellConfig::load_from_path(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_file_is_ignored_by_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SHELL_CONFIG_FILE_NAME);
        fs::write(&path, "submenu_policy = 'nope'").unwrap();
        assert!(matches!(ShellConfig::load_from_path(&path), Err(ConfigError::Parse { .. })));

        temp_env::with_var(SHELL_CONFIG_ENV, Some(path.to_str().unwrap()), || {
            assert_eq!(ShellConfig::load(), ShellConfig::default());
        });
    }
}
