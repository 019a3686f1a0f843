//! Render model for the navigation menu.
//!
//! [`menu_rows`] flattens the tree into the rows the component draws. Keeping
//! it a pure function of the shell means the drawing code never decides what
//! is visible; it only decides how it looks.

use folio_nav::NavigationShell;
use folio_types::MenuEntry;

/// One drawable menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub entry_id: String,
    pub label: String,
    pub icon: Option<String>,
    pub target: String,
    /// 0 for sections, 1 for submenu children.
    pub depth: u8,
    /// The entry is the resolved active entry for the current route.
    pub current: bool,
    /// The entry's target contains the current route (section highlight).
    pub active: bool,
    /// Expand/collapse indicator, present only on entries that own a submenu.
    pub expanded: Option<bool>,
    /// Identity of the submenu the indicator describes.
    pub controls: Option<String>,
}

impl MenuRow {
    fn from_entry(entry: &MenuEntry, shell: &NavigationShell) -> Self {
        let visible_submenu = shell.state().visible_submenu_id();
        let owns_submenu = entry.has_children();
        Self {
            entry_id: entry.id.clone(),
            label: entry.label.clone(),
            icon: entry.icon.clone(),
            target: entry.target.clone(),
            depth: u8::from(entry.level),
            current: shell.state().active_entry_id() == Some(entry.id.as_str()),
            active: shell.is_active(&entry.target),
            expanded: owns_submenu.then(|| visible_submenu == Some(entry.id.as_str())),
            controls: owns_submenu.then(|| submenu_dom_id(&entry.id)),
        }
    }
}

/// Stable identity of the submenu owned by `entry_id`.
pub fn submenu_dom_id(entry_id: &str) -> String {
    format!("submenu-{entry_id}")
}

/// Rows to draw, top to bottom. Children appear only beneath the one section
/// whose submenu is visible.
pub fn menu_rows(shell: &NavigationShell) -> Vec<MenuRow> {
    let visible_submenu = shell.state().visible_submenu_id();
    let mut rows = Vec::new();
    for section in shell.tree().top_level() {
        rows.push(MenuRow::from_entry(section, shell));
        if visible_submenu == Some(section.id.as_str()) {
            rows.extend(section.children.iter().map(|child| MenuRow::from_entry(child, shell)));
        }
    }
    rows
}
