//! Shared type definitions for the Folio workspace.
//!
//! The site bundle (menu + content) and the message vocabulary exchanged
//! between the terminal runtime and the components live here so that the
//! navigation core and the UI agree on one set of types.

mod content;
mod menu;

use serde::{Deserialize, Serialize};

pub use content::*;
pub use menu::*;

/// Path of the site root; the only route that shows the intro panel.
pub const ROOT_PATH: &str = "/";

/// Returns `true` when `path` is the site root.
pub fn is_root_path(path: &str) -> bool {
    path == ROOT_PATH
}

/// Live display signals reported by the preference source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPreferences {
    /// The user asked for animations to be skipped.
    pub reduced_motion: bool,
    /// The viewport satisfies the wide breakpoint.
    pub is_wide_viewport: bool,
}

impl Default for DisplayPreferences {
    /// Used whenever the platform cannot report either signal.
    fn default() -> Self {
        Self {
            reduced_motion: false,
            is_wide_viewport: true,
        }
    }
}

/// How route changes treat a submenu the user toggled by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmenuPolicy {
    /// Every route change re-derives the open submenu from the route.
    #[default]
    FollowRoute,
    /// Route changes only open the submenu of a section that contains the
    /// route; otherwise the manual toggle is kept.
    PersistToggle,
}

/// Messages delivered to the application and its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Animation tick.
    Tick,
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// The route source reported a navigation to this path.
    RouteChanged(String),
    /// The preference source reported new display signals.
    PreferencesChanged(DisplayPreferences),
}

/// Side effects requested by components and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the route source to navigate to the path.
    Navigate(String),
    /// Ask the route source to go back one entry in its history.
    NavigateBack,
    /// Flip and persist the reduced-motion preference.
    ToggleReducedMotion,
    /// Leave the application.
    Quit,
}
