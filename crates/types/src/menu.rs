//! Menu definitions supplied by the site bundle.
//!
//! These are plain data: validation (unique ids, sibling order, cycles) lives
//! in `folio-nav`, which turns a list of entries into a traversable tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Depth of an entry inside the two-level menu.
///
/// Serialized as the integers `0` and `1` to match the bundle format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MenuLevel {
    /// Section entry rendered in the root list.
    Top,
    /// Sub-section rendered beneath its parent when the submenu is open.
    Child,
}

impl MenuLevel {
    /// Numeric depth (`0` for top-level, `1` for children).
    pub const fn depth(self) -> u8 {
        match self {
            Self::Top => 0,
            Self::Child => 1,
        }
    }

    /// Level expected for the children of an entry at this level.
    pub const fn child_level(self) -> Option<MenuLevel> {
        match self {
            Self::Top => Some(Self::Child),
            Self::Child => None,
        }
    }
}

/// Raised when a bundle declares a level outside `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMenuLevel(pub u8);

impl fmt::Display for InvalidMenuLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid menu level {}; expected 0 or 1", self.0)
    }
}

impl std::error::Error for InvalidMenuLevel {}

impl TryFrom<u8> for MenuLevel {
    type Error = InvalidMenuLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Top),
            1 => Ok(Self::Child),
            other => Err(InvalidMenuLevel(other)),
        }
    }
}

impl From<MenuLevel> for u8 {
    fn from(level: MenuLevel) -> Self {
        level.depth()
    }
}

/// A single navigation entry as declared by the site bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Unique identifier across the whole menu.
    pub id: String,
    /// Text shown in the shell.
    pub label: String,
    /// Absolute route this entry points at (e.g. `/work/resume`).
    pub target: String,
    /// Depth in the menu.
    pub level: MenuLevel,
    /// Parent entry id; `None` for top-level entries.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Nested children, rendered in `order`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,
    /// Optional glyph rendered before the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Render position among siblings; unique per sibling list.
    pub order: i32,
}

impl MenuEntry {
    /// Creates a top-level entry without children.
    pub fn top(id: impl Into<String>, label: impl Into<String>, target: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            target: target.into(),
            level: MenuLevel::Top,
            parent_id: None,
            children: Vec::new(),
            icon: None,
            order,
        }
    }

    /// Creates a level-1 entry owned by `parent_id`.
    pub fn child(
        parent_id: impl Into<String>,
        id: impl Into<String>,
        label: impl Into<String>,
        target: impl Into<String>,
        order: i32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            target: target.into(),
            level: MenuLevel::Child,
            parent_id: Some(parent_id.into()),
            children: Vec::new(),
            icon: None,
            order,
        }
    }

    /// Attaches `children` to this entry, replacing any existing ones.
    pub fn with_children(mut self, children: Vec<MenuEntry>) -> Self {
        self.children = children;
        self
    }

    /// Whether activating this entry toggles a submenu rather than navigating.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_top_level(&self) -> bool {
        self.level == MenuLevel::Top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_entry_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "id": "work",
            "label": "Work",
            "target": "/work",
            "level": 0,
            "order": 1,
            "children": [
                { "id": "resume", "label": "Resume", "target": "/work/resume", "level": 1, "parentId": "work", "order": 1 }
            ]
        }"#;

        let entry: MenuEntry = serde_json::from_str(json).expect("deserialize MenuEntry");
        assert_eq!(entry.level, MenuLevel::Top);
        assert!(entry.parent_id.is_none());
        assert!(entry.has_children());
        assert_eq!(entry.children[0].parent_id.as_deref(), Some("work"));
        assert_eq!(entry.children[0].level, MenuLevel::Child);
    }

    #[test]
    fn level_outside_two_tiers_is_rejected() {
        let json = r#"{ "id": "x", "label": "X", "target": "/x", "level": 2, "order": 1 }"#;
        let error = serde_json::from_str::<MenuEntry>(json).expect_err("level 2 must fail");
        assert!(error.to_string().contains("invalid menu level 2"), "{error}");
    }

    #[test]
    fn level_serializes_as_integer() {
        let entry = MenuEntry::top("about", "About", "/about", 3);
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["level"], 0);
        assert!(value.get("children").is_none());
    }
}
