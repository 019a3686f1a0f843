//! Navigation shell state machine.
//!
//! `NavigationState` is only mutated by the route-changed, activation, header
//! and escape transitions plus the mount-time seed. Everything the
//! renderer needs is read back through getters, which normalize the
//! "submenu id kept while collapsed" case on every read.

use folio_types::{SubmenuPolicy, is_root_path};
use serde::Serialize;
use tracing::debug;

use crate::MenuTree;
use crate::resolver::{resolve, submenu_for};

/// Display mode of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellMode {
    /// Collapsed: the panel fills the viewport (site root).
    Intro,
    /// Expanded: a fixed panel next to the content.
    Sidebar,
}

/// Submenu sub-state as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmenuState<'a> {
    Open(&'a str),
    Closed,
}

/// What a route-changed notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The route equals the current one; nothing was touched.
    Unchanged,
    /// State was recomputed. `mode_changed` is set when the route crossed the
    /// root boundary.
    Updated { mode_changed: bool },
}

/// What activating an entry asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A leaf was activated; the route source should navigate to `target`.
    Navigate { target: String },
    /// A parent was activated and its submenu toggled. The parent's own page
    /// is still requested at `target`.
    SubmenuToggled { id: String, open: bool, target: String },
    /// The id is not part of the tree.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeOutcome {
    SubmenuClosed(String),
    ShellCollapsed,
    Ignored,
}

/// State owned by one shell mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    expanded: bool,
    expanded_submenu_id: Option<String>,
    active_entry_id: Option<String>,
}

impl NavigationState {
    /// Seeds the state for a shell mounted on `route`.
    ///
    /// The submenu is derived with the same resolver the route-changed
    /// transition uses, so a duplicate notification right after mount is a
    /// no-op.
    pub fn seed(tree: &MenuTree, route: &str) -> Self {
        let resolution = resolve(tree, route);
        let state = Self {
            expanded: !is_root_path(route),
            expanded_submenu_id: submenu_for(tree, &resolution),
            active_entry_id: resolution.active_entry_id,
        };
        debug!(route, mode = ?state.mode(), submenu = ?state.expanded_submenu_id, "navigation state seeded");
        state
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Raw submenu id, which may be kept while the shell is collapsed.
    pub fn expanded_submenu_id(&self) -> Option<&str> {
        self.expanded_submenu_id.as_deref()
    }

    /// Submenu that should actually be drawn open.
    pub fn visible_submenu_id(&self) -> Option<&str> {
        if self.expanded { self.expanded_submenu_id.as_deref() } else { None }
    }

    pub fn submenu(&self) -> SubmenuState<'_> {
        match self.visible_submenu_id() {
            Some(id) => SubmenuState::Open(id),
            None => SubmenuState::Closed,
        }
    }

    pub fn active_entry_id(&self) -> Option<&str> {
        self.active_entry_id.as_deref()
    }

    pub fn mode(&self) -> ShellMode {
        if self.expanded { ShellMode::Sidebar } else { ShellMode::Intro }
    }

    /// Transition 1: the route source reported `next` after `previous`.
    pub fn on_route_changed(
        &mut self,
        tree: &MenuTree,
        previous: &str,
        next: &str,
        policy: SubmenuPolicy,
    ) -> RouteOutcome {
        if previous == next {
            return RouteOutcome::Unchanged;
        }

        let was_expanded = self.expanded;
        match (is_root_path(previous), is_root_path(next)) {
            (true, false) => self.expanded = true,
            (false, true) => self.expanded = false,
            _ => {}
        }

        let resolution = resolve(tree, next);
        let submenu = submenu_for(tree, &resolution);
        self.active_entry_id = resolution.active_entry_id;
        match policy {
            SubmenuPolicy::FollowRoute => self.expanded_submenu_id = submenu,
            SubmenuPolicy::PersistToggle => {
                if submenu.is_some() {
                    self.expanded_submenu_id = submenu;
                }
            }
        }

        let mode_changed = was_expanded != self.expanded;
        debug!(
            previous,
            next,
            mode_changed,
            active = ?self.active_entry_id,
            submenu = ?self.expanded_submenu_id,
            "route transition"
        );
        RouteOutcome::Updated { mode_changed }
    }

    /// Transitions 2 and 3: the user activated entry `id`.
    ///
    /// Both kinds of activation force the sidebar open and hand their target
    /// back for the route source. Parents also toggle their submenu, which
    /// closes any other open submenu.
    pub fn on_activate(&mut self, tree: &MenuTree, id: &str) -> Activation {
        let Some(entry) = tree.get(id) else {
            return Activation::Unknown;
        };
        self.expanded = true;

        if !entry.has_children() {
            return Activation::Navigate {
                target: entry.target.clone(),
            };
        }

        let open = self.expanded_submenu_id.as_deref() != Some(id);
        self.expanded_submenu_id = open.then(|| entry.id.clone());
        debug!(id, open, "submenu toggled");
        Activation::SubmenuToggled {
            id: entry.id.clone(),
            open,
            target: entry.target.clone(),
        }
    }

    /// The sidebar header was activated: collapse to the intro panel.
    ///
    /// Returns whether the mode changed. The submenu id is kept, hidden, just
    /// like an Escape collapse.
    pub fn on_header_activate(&mut self) -> bool {
        let was_expanded = std::mem::replace(&mut self.expanded, false);
        if was_expanded {
            debug!("shell collapsed by header");
        }
        was_expanded
    }

    /// Transition 4: Escape closes an open submenu first and only collapses
    /// the shell once no submenu is open.
    pub fn on_escape(&mut self) -> EscapeOutcome {
        if self.expanded
            && let Some(id) = self.expanded_submenu_id.take()
        {
            debug!(id = %id, "submenu closed by escape");
            return EscapeOutcome::SubmenuClosed(id);
        }
        if self.expanded {
            self.expanded = false;
            debug!("shell collapsed by escape");
            return EscapeOutcome::ShellCollapsed;
        }
        EscapeOutcome::Ignored
    }
}
