//! Application state for the Folio TUI.
//!
//! `App` owns the mounted [`NavigationShell`] together with the UI-side state
//! that hangs off it: the panel animation, focus flags for the menu and the
//! content scroll position. It is only ever touched from the runtime loop, so
//! every message is processed to completion before the next one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_nav::{Activation, EscapeOutcome, NavigationShell, RouteOutcome, ShellAnimation, ShellFrame, ShellMode};
use folio_types::{Effect, Msg, ROOT_PATH, SiteContent};
use folio_util::UserPreferences;
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, warn};

use crate::ui::components::{ContentState, NavShellState, NavTarget};
use crate::ui::theme::Theme;

/// Cross-cutting context shared by all components.
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
    pub site: Arc<SiteContent>,
    /// Persisted preferences (theme, reduced motion).
    pub preferences: UserPreferences,
}

pub struct App {
    pub ctx: SharedCtx,
    pub shell: NavigationShell,
    pub animation: ShellAnimation,
    pub nav: NavShellState,
    pub content: ContentState,
    pub focus: Focus,
    /// Terminal size as (columns, rows).
    pub viewport: (u16, u16),
    container_focus: FocusFlag,
}

impl App {
    pub fn new(ctx: SharedCtx, shell: NavigationShell, viewport: (u16, u16), transition: Duration) -> Self {
        let animation = ShellAnimation::new(shell.target_frame(viewport.0), transition);
        let mut nav = NavShellState::new(shell.tree());
        nav.sync(&shell);
        let mut app = Self {
            ctx,
            shell,
            animation,
            nav,
            content: ContentState::default(),
            focus: Focus::default(),
            viewport,
            container_focus: FocusFlag::named("app"),
        };
        app.focus = FocusBuilder::build_for(&app);
        app
    }

    /// Applies an application message. Navigation messages are forwarded to
    /// the shell; geometry is re-targeted afterwards.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {}
            Msg::Resize(columns, rows) => {
                self.viewport = (*columns, *rows);
                self.sync(true);
            }
            Msg::RouteChanged(route) => {
                if let RouteOutcome::Updated { .. } = self.shell.route_changed(route) {
                    self.content.reset_scroll();
                    self.sync(false);
                }
            }
            Msg::PreferencesChanged(preferences) => {
                if self.shell.preferences_changed(*preferences) {
                    self.sync(false);
                }
            }
        }
        Vec::new()
    }

    /// Activates the header or a menu entry.
    ///
    /// The header collapses the shell right away; the route source may not
    /// report anything when the route already is the root.
    pub fn activate_target(&mut self, target: &NavTarget) -> Vec<Effect> {
        match target {
            NavTarget::Header => {
                if self.shell.activate_header() {
                    self.sync(false);
                }
                vec![Effect::Navigate(ROOT_PATH.to_string())]
            }
            NavTarget::Entry(id) => self.activate(id),
        }
    }

    /// Opens or closes a parent's submenu without visiting its page.
    pub fn toggle_submenu(&mut self, id: &str) {
        let activation = self.shell.activate(id);
        self.sync(false);
        if let Activation::Unknown = activation {
            warn!(id, "toggle of unknown menu entry ignored");
        }
    }

    fn activate(&mut self, id: &str) -> Vec<Effect> {
        let activation = self.shell.activate(id);
        self.sync(false);
        match activation {
            Activation::Navigate { target } | Activation::SubmenuToggled { target, .. } => {
                vec![Effect::Navigate(target)]
            }
            Activation::Unknown => {
                warn!(id, "activation of unknown menu entry ignored");
                Vec::new()
            }
        }
    }

    pub fn escape(&mut self) -> EscapeOutcome {
        let outcome = self.shell.escape();
        if outcome != EscapeOutcome::Ignored {
            self.sync(false);
        }
        outcome
    }

    /// The content area is visible (and focusable) only beside the sidebar.
    pub fn shows_content(&self) -> bool {
        self.shell.mode() == ShellMode::Sidebar
    }

    pub fn frame(&self, now: Instant) -> ShellFrame {
        self.animation.sample(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation.is_animating(now)
    }

    /// Rebuilds the focus ring after the set of visible widgets changed.
    pub fn rebuild_focus(&mut self) {
        let old_focus = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(self, Some(old_focus));
    }

    /// Refreshes the visible rows and moves the panel towards the geometry of
    /// the current state. `snap` skips the transition (terminal resizes).
    fn sync(&mut self, snap: bool) {
        self.nav.sync(&self.shell);
        if !self.shows_content() {
            self.content.focus.set(false);
        }
        let target = self.shell.target_frame(self.viewport.0);
        if snap {
            self.animation.snap(target);
        } else {
            let reduced_motion = self.shell.preferences().reduced_motion;
            self.animation.retarget(target, Instant::now(), reduced_motion);
        }
        debug!(mode = ?self.shell.mode(), ?target, snap, "shell geometry synced");
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.widget(&self.nav);
        if self.shows_content() {
            builder.widget(&self.content);
        }
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::new(0, 0, self.viewport.0, self.viewport.1)
    }
}


#[cfg(test)]
mod tests {
    use folio_nav::{ContentOffset, RouteSource};

    use super::test_support::app_at;
    use super::*;

    #[test]
    fn route_messages_drive_mode_and_geometry() {
        let mut app = app_at("/");
        assert_eq!(app.frame(Instant::now()).panel_width, 100);
        assert!(!app.shows_content());

        app.update(&Msg::RouteChanged("/work/resume".into()));
        assert_eq!(app.shell.mode(), ShellMode::Sidebar);
        let frame = app.frame(Instant::now());
        assert_eq!(frame.panel_width, 32);
        assert_eq!(frame.content_offset, ContentOffset(32));
        assert!(app.nav.rows.iter().any(|row| row.entry_id == "resume"));
    }

    #[test]
    fn duplicate_route_message_keeps_the_scroll_position() {
        let mut app = app_at("/about");
        app.content.last_area = Rect::new(0, 0, 40, 5);
        app.content.set_content_height(50);
        app.content.scroll_by(10);

        app.update(&Msg::RouteChanged("/about".into()));
        assert_eq!(app.content.scroll(), 10);
        app.update(&Msg::RouteChanged("/work".into()));
        assert_eq!(app.content.scroll(), 0);
    }

    #[test]
    fn narrow_viewport_preference_shrinks_the_sidebar() {
        let mut app = app_at("/about");
        app.update(&Msg::PreferencesChanged(folio_types::DisplayPreferences {
            reduced_motion: true,
            is_wide_viewport: false,
        }));
        let frame = app.frame(Instant::now());
        assert_eq!(frame.panel_width, 24);
        assert_eq!(frame.content_offset, ContentOffset(24));
    }

    #[test]
    fn animated_transition_starts_from_the_previous_frame() {
        let mut app = app_at("/");
        app.update(&Msg::PreferencesChanged(folio_types::DisplayPreferences {
            reduced_motion: false,
            is_wide_viewport: true,
        }));
        app.update(&Msg::RouteChanged("/about".into()));
        let now = Instant::now();
        assert!(app.is_animating(now));
        assert!(app.frame(now).panel_width > 32);
        assert_eq!(app.animation.target().panel_width, 32);
    }

    #[test]
    fn escape_closes_then_collapses_and_drops_content_focus() {
        let mut app = app_at("/work/resume");
        app.rebuild_focus();
        app.focus.focus(&app.content.focus.clone());
        assert!(app.content.focus.get());

        assert_eq!(app.escape(), EscapeOutcome::SubmenuClosed("work".into()));
        assert!(app.shows_content());
        assert_eq!(app.escape(), EscapeOutcome::ShellCollapsed);
        assert!(!app.shows_content());
        assert!(!app.content.focus.get());
        assert_eq!(app.animation.target().panel_width, 100);
    }

    #[test]
    fn header_activation_navigates_home() {
        let mut app = app_at("/about");
        assert_eq!(
            app.activate_target(&NavTarget::Header),
            vec![Effect::Navigate("/".into())]
        );
        assert_eq!(app.shell.mode(), ShellMode::Intro);
        assert!(app.activate_target(&NavTarget::Entry("missing".into())).is_empty());
    }

    #[test]
    fn header_collapses_a_sidebar_opened_on_the_root() {
        let mut app = app_at("/");
        let mut routes = RouteSource::new("/");
        app.toggle_submenu("work");
        assert_eq!(app.shell.mode(), ShellMode::Sidebar);
        assert_eq!(app.animation.target().panel_width, 32);

        let effects = app.activate_target(&NavTarget::Header);
        assert_eq!(effects, vec![Effect::Navigate("/".into())]);
        // Already on the root: the route source stays quiet.
        assert!(!routes.navigate("/"));
        assert_eq!(app.shell.mode(), ShellMode::Intro);
        assert_eq!(app.animation.target().panel_width, 100);
        assert!(!app.shows_content());
    }

    #[test]
    fn parent_activation_opens_the_submenu_and_visits_the_section() {
        let mut app = app_at("/about");
        let effects = app.activate_target(&NavTarget::Entry("work".into()));
        assert_eq!(effects, vec![Effect::Navigate("/work".into())]);
        assert_eq!(app.shell.state().visible_submenu_id(), Some("work"));

        app.update(&Msg::RouteChanged("/work".into()));
        assert_eq!(app.shell.state().visible_submenu_id(), Some("work"));
        assert_eq!(app.shell.state().active_entry_id(), Some("work"));
    }
}
