//! Content area: the inert page for the current route.

mod content_component;
mod pages;
mod state;

pub use content_component::ContentComponent;
pub use state::ContentState;
