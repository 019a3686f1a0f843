//! Validated menu tree.
//!
//! A `MenuTree` is built once from the entries declared in the site bundle.
//! Construction attaches flat entries (declared at the root list with a
//! `parentId`) beneath their parent, then rejects anything the shell could not
//! traverse safely: cycles, duplicate ids, duplicate sibling orders, entries
//! at the wrong depth and relative targets. Top-level entries and children are
//! stored sorted by `order`.

use std::collections::HashSet;

use folio_types::{MenuEntry, MenuLevel};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

const ROOT_LIST: &str = "<root>";

/// Configuration errors detected while building a [`MenuTree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuTreeError {
    #[error("menu entry is missing an id (label '{label}')")]
    MissingId { label: String },
    #[error("duplicate menu entry id '{0}'")]
    DuplicateId(String),
    #[error("menu entry '{id}' has target '{target}'; targets must be absolute paths")]
    RelativeTarget { id: String, target: String },
    #[error("menu entries '{first}' and '{second}' share order {order} under {parent}")]
    DuplicateOrder {
        parent: String,
        order: i32,
        first: String,
        second: String,
    },
    #[error("menu entry '{id}' declares level {found} but sits at depth {expected}")]
    LevelMismatch { id: String, expected: u8, found: u8 },
    #[error("menu entry '{id}' names parent '{declared}' but is nested under '{actual}'")]
    ParentMismatch { id: String, declared: String, actual: String },
    #[error("menu entry '{id}' references unknown parent '{parent}'")]
    UnknownParent { id: String, parent: String },
    #[error("menu entries form a cycle: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },
}

/// Position of an entry inside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EntryLocation {
    top: usize,
    child: Option<usize>,
}

/// Two-level menu, sorted and indexed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuTree {
    entries: Vec<MenuEntry>,
    index: IndexMap<String, EntryLocation>,
}

impl MenuTree {
    /// Builds and validates a tree from the bundle's root list.
    pub fn from_entries(entries: Vec<MenuEntry>) -> Result<Self, MenuTreeError> {
        let (mut roots, detached): (Vec<MenuEntry>, Vec<MenuEntry>) =
            entries.into_iter().partition(|entry| entry.parent_id.is_none());

        check_parent_chains(&roots, &detached)?;
        attach_detached(&mut roots, detached)?;

        let mut seen = HashSet::new();
        validate_siblings(&mut roots, None, MenuLevel::Top.depth(), &mut seen)?;

        let mut index = IndexMap::with_capacity(seen.len());
        for (top, entry) in roots.iter().enumerate() {
            index.insert(entry.id.clone(), EntryLocation { top, child: None });
            for (child, nested) in entry.children.iter().enumerate() {
                index.insert(nested.id.clone(), EntryLocation { top, child: Some(child) });
            }
        }
        debug!(entries = index.len(), sections = roots.len(), "menu tree loaded");

        Ok(Self { entries: roots, index })
    }

    /// Top-level entries in render order.
    pub fn top_level(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Looks up any entry by id.
    pub fn get(&self, id: &str) -> Option<&MenuEntry> {
        let location = self.index.get(id)?;
        let top = self.entries.get(location.top)?;
        match location.child {
            Some(child) => top.children.get(child),
            None => Some(top),
        }
    }

    /// Top-level entry that owns `id`; `None` for top-level ids and unknown ids.
    pub fn parent_of(&self, id: &str) -> Option<&MenuEntry> {
        let location = self.index.get(id)?;
        location.child.and(self.entries.get(location.top))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Total number of entries at both levels.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Every entry in render order (each parent directly followed by its children).
    pub fn iter(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.iter().flat_map(|entry| std::iter::once(entry).chain(entry.children.iter()))
    }
}

/// Walks the `parentId` chain of each flat entry and fails on loops or
/// references to ids that do not exist anywhere in the bundle.
fn check_parent_chains(roots: &[MenuEntry], detached: &[MenuEntry]) -> Result<(), MenuTreeError> {
    let mut parents: IndexMap<&str, Option<&str>> = IndexMap::new();
    for root in roots {
        collect_nested_parents(root, None, &mut parents)?;
    }
    for entry in detached {
        if parents.contains_key(entry.id.as_str()) {
            return Err(MenuTreeError::DuplicateId(entry.id.clone()));
        }
        parents.insert(entry.id.as_str(), entry.parent_id.as_deref());
        for child in &entry.children {
            collect_nested_parents(child, Some(entry.id.as_str()), &mut parents)?;
        }
    }

    for entry in detached {
        let mut path = vec![entry.id.clone()];
        let mut current = entry.parent_id.as_deref();
        while let Some(parent) = current {
            if path.iter().any(|visited| visited == parent) {
                path.push(parent.to_string());
                return Err(MenuTreeError::Cycle { path });
            }
            let Some(next) = parents.get(parent) else {
                return Err(MenuTreeError::UnknownParent {
                    id: path.last().cloned().unwrap_or_default(),
                    parent: parent.to_string(),
                });
            };
            path.push(parent.to_string());
            current = *next;
        }
    }
    Ok(())
}

fn collect_nested_parents<'a>(
    entry: &'a MenuEntry,
    container: Option<&'a str>,
    parents: &mut IndexMap<&'a str, Option<&'a str>>,
) -> Result<(), MenuTreeError> {
    if parents.insert(entry.id.as_str(), container).is_some() {
        return Err(MenuTreeError::DuplicateId(entry.id.clone()));
    }
    for child in &entry.children {
        collect_nested_parents(child, Some(entry.id.as_str()), parents)?;
    }
    Ok(())
}

/// Moves flat entries beneath their parents. Chains were checked already, so
/// every pass attaches at least one entry until none remain.
fn attach_detached(roots: &mut [MenuEntry], mut pending: Vec<MenuEntry>) -> Result<(), MenuTreeError> {
    while !pending.is_empty() {
        let before = pending.len();
        let mut unattached = Vec::with_capacity(pending.len());
        for entry in pending {
            if let Some(entry) = try_attach(roots, entry) {
                unattached.push(entry);
            }
        }
        if unattached.len() == before {
            let entry = &unattached[0];
            return Err(MenuTreeError::UnknownParent {
                id: entry.id.clone(),
                parent: entry.parent_id.clone().unwrap_or_default(),
            });
        }
        pending = unattached;
    }
    Ok(())
}

/// Returns the entry back when its parent is not in the tree yet.
fn try_attach(entries: &mut [MenuEntry], entry: MenuEntry) -> Option<MenuEntry> {
    let parent_id = entry.parent_id.clone().unwrap_or_default();
    let mut entry = Some(entry);
    for candidate in entries.iter_mut() {
        let Some(current) = entry.take() else {
            return None;
        };
        if candidate.id == parent_id {
            candidate.children.push(current);
            return None;
        }
        entry = try_attach(&mut candidate.children, current);
    }
    entry
}

fn validate_siblings(
    siblings: &mut [MenuEntry],
    parent: Option<&str>,
    depth: u8,
    seen: &mut HashSet<String>,
) -> Result<(), MenuTreeError> {
    for entry in siblings.iter_mut() {
        if entry.id.trim().is_empty() {
            return Err(MenuTreeError::MissingId {
                label: entry.label.clone(),
            });
        }
        if !seen.insert(entry.id.clone()) {
            return Err(MenuTreeError::DuplicateId(entry.id.clone()));
        }
        if !entry.target.starts_with('/') {
            return Err(MenuTreeError::RelativeTarget {
                id: entry.id.clone(),
                target: entry.target.clone(),
            });
        }
        if entry.level.depth() != depth {
            return Err(MenuTreeError::LevelMismatch {
                id: entry.id.clone(),
                expected: depth,
                found: entry.level.depth(),
            });
        }
        if let Some(actual) = parent {
            match entry.parent_id.as_deref() {
                Some(declared) if declared != actual => {
                    return Err(MenuTreeError::ParentMismatch {
                        id: entry.id.clone(),
                        declared: declared.to_string(),
                        actual: actual.to_string(),
                    });
                }
                Some(_) => {}
                None => entry.parent_id = Some(actual.to_string()),
            }
        }

        if !entry.children.is_empty() {
            let Some(child_level) = entry.level.child_level() else {
                let nested = &entry.children[0];
                return Err(MenuTreeError::LevelMismatch {
                    id: nested.id.clone(),
                    expected: depth + 1,
                    found: nested.level.depth(),
                });
            };
            let id = entry.id.clone();
            validate_siblings(&mut entry.children, Some(&id), child_level.depth(), seen)?;
        }
    }

    siblings.sort_by_key(|entry| entry.order);
    if let Some(pair) = siblings.windows(2).find(|pair| pair[0].order == pair[1].order) {
        return Err(MenuTreeError::DuplicateOrder {
            parent: parent.unwrap_or(ROOT_LIST).to_string(),
            order: pair[0].order,
            first: pair[0].id.clone(),
            second: pair[1].id.clone(),
        });
    }
    Ok(())
}
