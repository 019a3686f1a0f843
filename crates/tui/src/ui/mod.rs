//! Terminal user interface: components, theming, layout helpers and the
//! runtime loop that drives them.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
