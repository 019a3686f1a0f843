pub mod config;
pub mod path_processing;
pub mod preferences;

pub use config::*;
pub use path_processing::*;
pub use preferences::*;

/// Interprets common "on" spellings of an environment flag.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enable" | "enabled"
    )
}

/// Interprets common "off" spellings of an environment flag.
pub fn is_falsy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off" | "disable" | "disabled"
    )
}

/// Reads a boolean flag from the environment; `None` when unset or unrecognized.
pub fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    if is_truthy(&value) {
        Some(true)
    } else if is_falsy(&value) {
        Some(false)
    } else {
        None
    }
}
