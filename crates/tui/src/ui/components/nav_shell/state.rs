use folio_nav::{MenuTree, NavigationShell, ShellMode};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use super::menu_rows::{MenuRow, menu_rows};

/// Something in the shell the user can activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// The profile name in the sidebar header.
    Header,
    Entry(String),
}

/// Focus and layout state of the navigation shell.
///
/// Every menu entry owns a `FocusFlag` for the lifetime of the mount; only the
/// flags of rows that are currently drawn take part in the focus ring.
#[derive(Debug, Clone)]
pub struct NavShellState {
    pub container_focus: FocusFlag,
    pub header_focus: FocusFlag,
    entry_focus: Vec<(String, FocusFlag)>,
    /// Rows from the last sync, top to bottom.
    pub rows: Vec<MenuRow>,
    /// The header is activatable (sidebar mode only).
    pub header_interactive: bool,
    /// Last rendered area of the panel; used for hit testing.
    pub last_area: Rect,
    pub header_area: Rect,
    /// Per-row areas from the last render, parallel to `rows`.
    pub row_areas: Vec<Rect>,
}

impl NavShellState {
    pub fn new(tree: &MenuTree) -> Self {
        let entry_focus = tree
            .iter()
            .map(|entry| {
                let flag = FocusFlag::named(&format!("nav.shell.entry.{}", entry.id));
                (entry.id.clone(), flag)
            })
            .collect();
        Self {
            container_focus: FocusFlag::named("nav.shell"),
            header_focus: FocusFlag::named("nav.shell.header"),
            entry_focus,
            rows: Vec::new(),
            header_interactive: false,
            last_area: Rect::default(),
            header_area: Rect::default(),
            row_areas: Vec::new(),
        }
    }

    /// Re-derives the visible rows from the shell. Rows that disappeared give
    /// up focus so the next focus rebuild can pick a visible target.
    pub fn sync(&mut self, shell: &NavigationShell) {
        self.rows = menu_rows(shell);
        self.header_interactive = shell.mode() == ShellMode::Sidebar;
        if !self.header_interactive {
            self.header_focus.set(false);
        }
        for (id, flag) in &self.entry_focus {
            if !self.rows.iter().any(|row| &row.entry_id == id) {
                flag.set(false);
            }
        }
    }

    pub fn flag_for(&self, entry_id: &str) -> Option<&FocusFlag> {
        self.entry_focus
            .iter()
            .find_map(|(id, flag)| (id == entry_id).then_some(flag))
    }

    /// Focus flags in ring order: header first (when interactive), then rows.
    fn ring(&self) -> Vec<(NavTarget, &FocusFlag)> {
        let mut ring = Vec::with_capacity(self.rows.len() + 1);
        if self.header_interactive {
            ring.push((NavTarget::Header, &self.header_focus));
        }
        for row in &self.rows {
            if let Some(flag) = self.flag_for(&row.entry_id) {
                ring.push((NavTarget::Entry(row.entry_id.clone()), flag));
            }
        }
        ring
    }

    pub fn focused_target(&self) -> Option<NavTarget> {
        self.ring()
            .into_iter()
            .find_map(|(target, flag)| flag.get().then_some(target))
    }

    pub fn flag_for_target(&self, target: &NavTarget) -> Option<FocusFlag> {
        match target {
            NavTarget::Header => Some(self.header_focus.clone()),
            NavTarget::Entry(id) => self.flag_for(id).cloned(),
        }
    }

    /// Next (or previous) flag after the focused one, wrapping at both ends.
    /// Without a focused element the first (or last) one is returned.
    pub fn cycle_focus(&self, forward: bool) -> Option<FocusFlag> {
        let ring = self.ring();
        if ring.is_empty() {
            return None;
        }
        let len = ring.len();
        let next = match ring.iter().position(|(_, flag)| flag.get()) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        ring.get(next).map(|(_, flag)| (*flag).clone())
    }

    pub fn edge_focus(&self, last: bool) -> Option<FocusFlag> {
        let ring = self.ring();
        let edge = if last { ring.last() } else { ring.first() };
        edge.map(|(_, flag)| (*flag).clone())
    }

    /// Where focus should land when nothing is focused: the current entry,
    /// else the active section, else the first row.
    pub fn preferred_focus(&self) -> Option<FocusFlag> {
        self.rows
            .iter()
            .find(|row| row.current)
            .or_else(|| self.rows.iter().find(|row| row.active && row.depth == 0))
            .or_else(|| self.rows.first())
            .and_then(|row| self.flag_for(&row.entry_id).cloned())
    }

    /// Target under the pointer, using the areas from the last render.
    pub fn target_at(&self, x: u16, y: u16) -> Option<NavTarget> {
        if self.header_interactive
            && crate::ui::utils::find_target_index_by_mouse_position(&self.last_area, &[self.header_area], x, y).is_some()
        {
            return Some(NavTarget::Header);
        }
        let index = crate::ui::utils::find_target_index_by_mouse_position(&self.last_area, &self.row_areas, x, y)?;
        self.rows.get(index).map(|row| NavTarget::Entry(row.entry_id.clone()))
    }

    pub fn is_focused(&self, entry_id: &str) -> bool {
        self.flag_for(entry_id).is_some_and(FocusFlag::get)
    }
}

impl HasFocus for NavShellState {
    /// Header and visible rows as leaves under the container flag.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for (_, flag) in self.ring() {
            builder.leaf_widget(flag);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_nav::ShellOptions;
    use folio_types::{DisplayPreferences, MenuEntry};

    use super::*;

    fn shell(route: &str) -> NavigationShell {
        let tree = MenuTree::from_entries(vec![
            MenuEntry::top("work", "Work", "/work", 1)
                .with_children(vec![MenuEntry::child("work", "resume", "Resume", "/work/resume", 1)]),
            MenuEntry::top("about", "About", "/about", 2),
        ])
        .expect("valid tree");
        NavigationShell::mount(Arc::new(tree), route, DisplayPreferences::default(), ShellOptions::default())
    }

    #[test]
    fn ring_skips_the_header_in_intro_mode() {
        let shell = shell("/");
        let mut state = NavShellState::new(shell.tree());
        state.sync(&shell);
        assert!(!state.header_interactive);
        let first = state.cycle_focus(true).expect("focusable row");
        assert_eq!(first.widget_id(), state.flag_for("work").expect("flag").widget_id());
    }

    #[test]
    fn cycling_wraps_around() {
        let shell = shell("/work/resume");
        let mut state = NavShellState::new(shell.tree());
        state.sync(&shell);
        state.flag_for("about").expect("flag").set(true);

        let next = state.cycle_focus(true).expect("wraps");
        assert_eq!(next.widget_id(), state.header_focus.widget_id());

        let previous = state.cycle_focus(false).expect("previous");
        assert_eq!(previous.widget_id(), state.flag_for("resume").expect("flag").widget_id());
    }

    #[test]
    fn hidden_rows_drop_their_focus() {
        let mut shell = shell("/work/resume");
        let mut state = NavShellState::new(shell.tree());
        state.sync(&shell);
        state.flag_for("resume").expect("flag").set(true);

        shell.escape();
        state.sync(&shell);
        assert!(!state.is_focused("resume"));
        assert_eq!(state.focused_target(), None);
        let preferred = state.preferred_focus().expect("fallback");
        assert_eq!(preferred.widget_id(), state.flag_for("work").expect("flag").widget_id());
    }

    #[test]
    fn pointer_hits_map_to_rows() {
        let shell = shell("/about");
        let mut state = NavShellState::new(shell.tree());
        state.sync(&shell);
        state.last_area = Rect::new(0, 0, 32, 20);
        state.header_area = Rect::new(2, 1, 12, 1);
        state.row_areas = vec![Rect::new(2, 3, 28, 1), Rect::new(2, 4, 28, 1)];

        assert_eq!(state.target_at(4, 1), Some(NavTarget::Header));
        assert_eq!(state.target_at(4, 4), Some(NavTarget::Entry("about".into())));
        assert_eq!(state.target_at(40, 4), None);
    }
}
