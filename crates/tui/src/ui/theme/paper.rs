//! Light palette echoing the printed portfolio: near-white page, ink text and
//! a single warm accent.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

pub const PAGE: Color = Color::Rgb(0xFA, 0xF9, 0xF6);
pub const SIDEBAR: Color = Color::Rgb(0xF0, 0xEE, 0xE8);
pub const RULE: Color = Color::Rgb(0xD6, 0xD3, 0xCB);
pub const INK: Color = Color::Rgb(0x1F, 0x1F, 0x1F);
pub const GRAPHITE: Color = Color::Rgb(0x4A, 0x4A, 0x4A);
pub const PENCIL: Color = Color::Rgb(0x80, 0x7D, 0x76);
pub const RUST: Color = Color::Rgb(0xB4, 0x4B, 0x1E);
pub const HARBOR: Color = Color::Rgb(0x1E, 0x5F, 0x8C);
pub const HIGHLIGHT: Color = Color::Rgb(0xE6, 0xDF, 0xD0);

#[derive(Debug, Clone)]
pub struct PaperTheme {
    roles: ThemeRoles,
}

impl PaperTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: PAGE,
                surface: SIDEBAR,
                border: RULE,
                divider: RULE,
                text: INK,
                text_secondary: GRAPHITE,
                text_muted: PENCIL,
                accent_primary: RUST,
                accent_secondary: HARBOR,
                selection_bg: HIGHLIGHT,
                selection_fg: INK,
                focus: HARBOR,
            },
        }
    }
}

impl Theme for PaperTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
