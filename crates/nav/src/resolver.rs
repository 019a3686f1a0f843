//! Active-path resolution.
//!
//! Everything here is a pure function of the menu tree and a route string, so
//! the state machine, the renderer and the `folio resolve` command all agree on
//! which entry is active.

use folio_types::{MenuEntry, ROOT_PATH, is_root_path};
use serde::Serialize;

use crate::MenuTree;

/// Result of resolving a route against the menu tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Most specific entry that is active for the route.
    pub active_entry_id: Option<String>,
    /// Top-level entry whose section contains the route.
    pub section_id: Option<String>,
    /// The section entry's own target is active.
    pub matched_is_top_level: bool,
    /// One of the section's children is active.
    pub matched_is_child: bool,
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        self.active_entry_id.is_some()
    }
}

/// Normalizes a raw route into the canonical absolute form used everywhere
/// else: leading slash, no query or fragment, no trailing slash except for the
/// root itself.
pub fn normalize_route(raw: &str) -> String {
    let path = raw.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return ROOT_PATH.to_string();
    }
    let mut normalized = String::with_capacity(trimmed.len() + 1);
    for segment in trimmed.split('/').filter(|segment| !segment.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    normalized
}

fn strip_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') { ROOT_PATH } else { trimmed }
}

/// Section-prefix match: `current` equals `path` or lives beneath it.
///
/// The root only ever matches itself, otherwise every route would be "inside"
/// the home section.
pub fn is_active_path(path: &str, current: &str) -> bool {
    let path = strip_trailing_slash(path);
    let current = strip_trailing_slash(current);
    if is_root_path(path) {
        return is_root_path(current);
    }
    current == path || current.strip_prefix(path).is_some_and(|rest| rest.starts_with('/'))
}

/// Resolves `current` against the tree.
///
/// Top-level entries are scanned in render order and the first section that
/// contains the route wins. Inside that section the longest active child
/// target is preferred (earlier order on ties); without an active child the
/// section entry itself is active.
pub fn resolve(tree: &MenuTree, current: &str) -> Resolution {
    for section in tree.top_level() {
        let section_active = is_active_path(&section.target, current);
        let child = most_specific_child(section, current);
        if !section_active && child.is_none() {
            continue;
        }
        let active = child.unwrap_or(section);
        return Resolution {
            active_entry_id: Some(active.id.clone()),
            section_id: Some(section.id.clone()),
            matched_is_top_level: section_active,
            matched_is_child: child.is_some(),
        };
    }
    Resolution::default()
}

fn most_specific_child<'a>(section: &'a MenuEntry, current: &str) -> Option<&'a MenuEntry> {
    let mut best: Option<&MenuEntry> = None;
    for child in section.children.iter().filter(|child| is_active_path(&child.target, current)) {
        if best.is_none_or(|found| strip_trailing_slash(&child.target).len() > strip_trailing_slash(&found.target).len())
        {
            best = Some(child);
        }
    }
    best
}

/// Submenu to open for `resolution`: its section, when that section owns
/// children.
pub fn submenu_for(tree: &MenuTree, resolution: &Resolution) -> Option<String> {
    let section = tree.get(resolution.section_id.as_deref()?)?;
    section.has_children().then(|| section.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> MenuTree {
        MenuTree::from_entries(vec![
            MenuEntry::top("home", "Home", "/", 0),
            MenuEntry::top("work", "Work", "/work", 1).with_children(vec![
                MenuEntry::child("work", "resume", "Resume", "/work/resume", 1),
                MenuEntry::child("work", "video", "Video", "/work/video", 2),
            ]),
            MenuEntry::top("about", "About", "/about", 2),
        ])
        .expect("valid tree")
    }

    #[test]
    fn root_only_matches_root() {
        assert!(is_active_path("/", "/"));
        assert!(!is_active_path("/", "/about"));
        assert!(!is_active_path("/about", "/"));
    }

    #[test]
    fn prefix_rule_requires_a_segment_boundary() {
        assert!(is_active_path("/work", "/work"));
        assert!(is_active_path("/work", "/work/resume"));
        assert!(is_active_path("/work/", "/work/resume/"));
        assert!(!is_active_path("/work", "/workshop"));
        assert!(!is_active_path("/work/resume", "/work"));
    }

    #[test]
    fn child_route_activates_child_inside_its_section() {
        let resolution = resolve(&tree(), "/work/resume");
        assert_eq!(resolution.active_entry_id.as_deref(), Some("resume"));
        assert_eq!(resolution.section_id.as_deref(), Some("work"));
        assert!(resolution.matched_is_top_level);
        assert!(resolution.matched_is_child);
    }

    #[test]
    fn section_route_activates_the_section() {
        let resolution = resolve(&tree(), "/work");
        assert_eq!(resolution.active_entry_id.as_deref(), Some("work"));
        assert!(resolution.matched_is_top_level);
        assert!(!resolution.matched_is_child);
    }

    #[test]
    fn unlisted_sub_page_falls_back_to_the_closest_entry() {
        let resolution = resolve(&tree(), "/work/resume/2019");
        assert_eq!(resolution.active_entry_id.as_deref(), Some("resume"));

        let resolution = resolve(&tree(), "/work/press");
        assert_eq!(resolution.active_entry_id.as_deref(), Some("work"));
    }

    #[test]
    fn unknown_route_resolves_to_nothing() {
        let resolution = resolve(&tree(), "/nowhere");
        assert_eq!(resolution, Resolution::default());
        assert!(!resolution.is_match());
        assert!(submenu_for(&tree(), &resolution).is_none());
    }

    #[test]
    fn submenu_only_for_sections_with_children() {
        let tree = tree();
        assert_eq!(submenu_for(&tree, &resolve(&tree, "/work/video")).as_deref(), Some("work"));
        assert!(submenu_for(&tree, &resolve(&tree, "/about")).is_none());
    }

    #[test]
    fn longest_child_target_wins() {
        let tree = MenuTree::from_entries(vec![MenuEntry::top("play", "Play", "/play", 1).with_children(vec![
            MenuEntry::child("play", "all", "All", "/play", 1),
            MenuEntry::child("play", "tech", "Tech", "/play/tech", 2),
        ])])
        .expect("valid tree");
        assert_eq!(resolve(&tree, "/play/tech").active_entry_id.as_deref(), Some("tech"));
        assert_eq!(resolve(&tree, "/play").active_entry_id.as_deref(), Some("all"));
    }

    #[test]
    fn resolution_serializes_camel_case_nulls() {
        let value = serde_json::to_value(resolve(&tree(), "/nowhere")).expect("serialize");
        assert!(value["activeEntryId"].is_null());
        assert!(value["sectionId"].is_null());
        assert_eq!(value["matchedIsChild"], false);
    }

    #[test]
    fn routes_are_normalized() {
        assert_eq!(normalize_route(""), "/");
        assert_eq!(normalize_route("  /  "), "/");
        assert_eq!(normalize_route("work//resume/"), "/work/resume");
        assert_eq!(normalize_route("/play/tech?page=2#top"), "/play/tech");
        assert_eq!(normalize_route("/?q=1"), "/");
    }
}
