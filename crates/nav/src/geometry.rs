//! Layout geometry derived from the shell mode and the viewport signal.

use serde::{Deserialize, Serialize};

use crate::state::ShellMode;

/// How wide the navigation panel is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelWidthMode {
    FillViewport,
    FixedPanel,
}

impl From<ShellMode> for PanelWidthMode {
    fn from(mode: ShellMode) -> Self {
        match mode {
            ShellMode::Intro => Self::FillViewport,
            ShellMode::Sidebar => Self::FixedPanel,
        }
    }
}

/// Columns the content area is pushed right by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ContentOffset(pub u16);

impl ContentOffset {
    pub const ZERO: ContentOffset = ContentOffset(0);

    pub fn columns(self) -> u16 {
        self.0
    }
}

/// Sidebar dimensions in terminal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellGeometry {
    /// Sidebar width on viewports at least `breakpoint_columns` wide.
    pub wide_panel_columns: u16,
    /// Sidebar width below the breakpoint.
    pub narrow_panel_columns: u16,
    /// Column count at which a viewport counts as wide.
    pub breakpoint_columns: u16,
}

impl Default for ShellGeometry {
    fn default() -> Self {
        Self {
            wide_panel_columns: 32,
            narrow_panel_columns: 24,
            breakpoint_columns: 100,
        }
    }
}

impl ShellGeometry {
    pub fn is_wide(&self, columns: u16) -> bool {
        columns >= self.breakpoint_columns
    }

    /// Offset applied to the content area: zero in intro mode, the sidebar
    /// width otherwise.
    pub fn content_offset(&self, mode: ShellMode, is_wide_viewport: bool) -> ContentOffset {
        match mode {
            ShellMode::Intro => ContentOffset::ZERO,
            ShellMode::Sidebar if is_wide_viewport => ContentOffset(self.wide_panel_columns),
            ShellMode::Sidebar => ContentOffset(self.narrow_panel_columns),
        }
    }

    /// Width of the panel itself for a viewport `viewport_columns` wide.
    pub fn panel_width(&self, mode: ShellMode, is_wide_viewport: bool, viewport_columns: u16) -> u16 {
        match PanelWidthMode::from(mode) {
            PanelWidthMode::FillViewport => viewport_columns,
            PanelWidthMode::FixedPanel => self.content_offset(mode, is_wide_viewport).0.min(viewport_columns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_fills_the_viewport_with_no_offset() {
        let geometry = ShellGeometry::default();
        assert_eq!(geometry.content_offset(ShellMode::Intro, true), ContentOffset::ZERO);
        assert_eq!(geometry.panel_width(ShellMode::Intro, true, 140), 140);
    }

    #[test]
    fn sidebar_offset_depends_on_viewport_width() {
        let geometry = ShellGeometry::default();
        assert_eq!(geometry.content_offset(ShellMode::Sidebar, true), ContentOffset(32));
        assert_eq!(geometry.content_offset(ShellMode::Sidebar, false), ContentOffset(24));
        assert_eq!(geometry.panel_width(ShellMode::Sidebar, false, 20), 20);
    }

    #[test]
    fn breakpoint_is_inclusive() {
        let geometry = ShellGeometry::default();
        assert!(geometry.is_wide(100));
        assert!(!geometry.is_wide(99));
    }
}
