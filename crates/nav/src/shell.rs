//! One mounted navigation shell.
//!
//! `NavigationShell` couples the state machine with the inputs it reacts to
//! (current route, display preferences) and exposes the derived outputs the
//! renderer and the content area consume.

use std::sync::Arc;

use folio_types::{DisplayPreferences, SubmenuPolicy};
use tracing::{debug, info};

use crate::MenuTree;
use crate::geometry::{ContentOffset, PanelWidthMode, ShellGeometry};
use crate::resolver::{Resolution, is_active_path, normalize_route, resolve};
use crate::state::{Activation, EscapeOutcome, NavigationState, RouteOutcome, ShellMode};
use crate::transition::ShellFrame;

/// Options fixed for the lifetime of a mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellOptions {
    pub policy: SubmenuPolicy,
    pub geometry: ShellGeometry,
}

#[derive(Debug, Clone)]
pub struct NavigationShell {
    tree: Arc<MenuTree>,
    state: NavigationState,
    current_route: String,
    preferences: DisplayPreferences,
    options: ShellOptions,
}

impl NavigationShell {
    /// Mounts a shell on `route`.
    pub fn mount(tree: Arc<MenuTree>, route: &str, preferences: DisplayPreferences, options: ShellOptions) -> Self {
        let current_route = normalize_route(route);
        let state = NavigationState::seed(&tree, &current_route);
        info!(route = %current_route, mode = ?state.mode(), "navigation shell mounted");
        Self {
            tree,
            state,
            current_route,
            preferences,
            options,
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_route(&self) -> &str {
        &self.current_route
    }

    pub fn preferences(&self) -> DisplayPreferences {
        self.preferences
    }

    pub fn options(&self) -> ShellOptions {
        self.options
    }

    pub fn mode(&self) -> ShellMode {
        self.state.mode()
    }

    pub fn resolution(&self) -> Resolution {
        resolve(&self.tree, &self.current_route)
    }

    /// The route source reported a navigation.
    pub fn route_changed(&mut self, route: &str) -> RouteOutcome {
        let next = normalize_route(route);
        let outcome = self
            .state
            .on_route_changed(&self.tree, &self.current_route, &next, self.options.policy);
        if let RouteOutcome::Updated { mode_changed } = outcome {
            info!(from = %self.current_route, to = %next, mode_changed, "route changed");
            self.current_route = next;
        }
        outcome
    }

    pub fn activate(&mut self, id: &str) -> Activation {
        let activation = self.state.on_activate(&self.tree, id);
        debug!(id, ?activation, "entry activated");
        activation
    }

    /// The sidebar header was activated. Collapses the shell even when the
    /// route is already the root and no route change will follow.
    pub fn activate_header(&mut self) -> bool {
        self.state.on_header_activate()
    }

    pub fn escape(&mut self) -> EscapeOutcome {
        self.state.on_escape()
    }

    /// The preference source reported new signals. Only geometry depends on
    /// them; navigation state is left alone.
    pub fn preferences_changed(&mut self, preferences: DisplayPreferences) -> bool {
        if self.preferences == preferences {
            return false;
        }
        debug!(?preferences, "display preferences changed");
        self.preferences = preferences;
        true
    }

    pub fn panel_width_mode(&self) -> PanelWidthMode {
        PanelWidthMode::from(self.mode())
    }

    /// Section-prefix match of `path` against the current route.
    pub fn is_active(&self, path: &str) -> bool {
        is_active_path(path, &self.current_route)
    }

    pub fn content_offset(&self) -> ContentOffset {
        self.options
            .geometry
            .content_offset(self.mode(), self.preferences.is_wide_viewport)
    }

    pub fn panel_width(&self, viewport_columns: u16) -> u16 {
        self.options
            .geometry
            .panel_width(self.mode(), self.preferences.is_wide_viewport, viewport_columns)
    }

    /// Final geometry for the current state; the animation eases towards it.
    pub fn target_frame(&self, viewport_columns: u16) -> ShellFrame {
        ShellFrame {
            panel_width: self.panel_width(viewport_columns),
            content_offset: self.content_offset(),
        }
    }
}
