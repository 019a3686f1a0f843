pub mod component;
pub mod content;
pub mod nav_shell;

pub(crate) use component::Component;
pub use content::{ContentComponent, ContentState};
pub use nav_shell::{NavShellComponent, NavShellState, NavTarget};
