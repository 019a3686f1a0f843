//! # Folio TUI
//!
//! Terminal front end for a Folio site. The navigation shell is drawn as a
//! full-screen intro panel at the site root and as a sidebar next to the
//! page everywhere else; moving between the two is animated unless reduced
//! motion is requested.
//!
//! ## Architecture
//!
//! Navigation state lives in `folio-nav`. This crate owns the terminal, turns
//! input into route changes and renders the shell and the current page as
//! ratatui components with rat-focus keyboard focus.

mod app;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use folio_nav::MenuTree;
use folio_types::SiteContent;

pub use ui::theme::{THEME_ENV, ThemeDefinition, catalog::THEME_DEFINITIONS};

/// Runs the TUI on `route` until the user quits.
///
/// # Errors
///
/// Fails when the terminal cannot be switched to raw mode or the alternate
/// screen, or when drawing fails.
pub async fn run(site: Arc<SiteContent>, tree: Arc<MenuTree>, route: String) -> Result<()> {
    ui::runtime::run_app(site, tree, route).await
}
