//! Navigation shell component.
//!
//! Renders the menu tree either as a full-screen intro panel (site root) or
//! as a fixed sidebar next to the content. It supports:
//! - rat-focus integration via one `FocusFlag` per entry plus the header
//! - Keyboard navigation (Up/Down/Home/End, Enter/Space, Left/Right)
//! - Mouse activation through the row areas recorded on every render
//!
//! What is drawn comes from `menu_rows`; the component never decides
//! visibility itself.

mod menu_rows;
mod nav_shell_component;
mod state;

pub use nav_shell_component::NavShellComponent;
pub use state::{NavShellState, NavTarget};
