//! Navigation shell core.
//!
//! Terminal-independent pieces of the Folio shell: the validated menu tree,
//! the active-path resolver, the navigation state machine with its derived
//! geometry, panel transition easing, and the route/preference sources that
//! drive it all.

pub mod geometry;
pub mod resolver;
pub mod shell;
pub mod sources;
pub mod state;
pub mod transition;
mod tree;

pub use geometry::{ContentOffset, PanelWidthMode, ShellGeometry};
pub use resolver::{Resolution, is_active_path, normalize_route, resolve};
pub use shell::{NavigationShell, ShellOptions};
pub use sources::{PreferenceSource, PreferenceWatcher, RouteSource, RouteWatcher};
pub use state::{Activation, EscapeOutcome, NavigationState, RouteOutcome, ShellMode, SubmenuState};
pub use transition::{DEFAULT_TRANSITION, ShellAnimation, ShellFrame, ease_in_out_cubic};
pub use tree::{MenuTree, MenuTreeError};
