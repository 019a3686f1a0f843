use std::env;
use std::path::PathBuf;

use dirs_next::{cache_dir, config_dir, home_dir};

/// Directory name used below the platform config and cache directories.
pub const APP_DIR_NAME: &str = "folio";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if p == "~" {
        return home();
    }
    if let Some(rest) = p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")) {
        return home().join(rest);
    }
    PathBuf::from(p)
}

/// Returns the path named by `env_var` when set and non-empty.
pub fn env_path(env_var: &str) -> Option<PathBuf> {
    let value = env::var(env_var).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(expand_tilde(&value))
}

/// `<config dir>/folio/<file_name>`, unless `env_var` overrides it.
pub fn config_file_path(env_var: &str, file_name: &str) -> PathBuf {
    env_path(env_var).unwrap_or_else(|| {
        config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(file_name)
    })
}

/// `<cache dir>/folio/<file_name>`, unless `env_var` overrides it.
pub fn cache_file_path(env_var: &str, file_name: &str) -> PathBuf {
    env_path(env_var).unwrap_or_else(|| {
        cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join(APP_DIR_NAME)
            .join(file_name)
    })
}
