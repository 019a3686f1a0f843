use ratatui::{style::Style, text::Span};

use super::roles::{Theme, ThemeRoles};

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the page behind the shell.
pub fn page_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { background, text, .. } = *theme.roles();
    Style::default().bg(background).fg(text)
}

/// Style for one menu row.
///
/// Focus wins over everything else so the keyboard cursor is always visible;
/// the active entry is bold accent text.
pub fn menu_row_style<T: Theme + ?Sized>(theme: &T, active: bool, focused: bool) -> Style {
    let base = if active {
        theme.accent_emphasis_style()
    } else {
        theme.text_primary_style()
    };
    if focused {
        base.patch(theme.selection_style())
    } else {
        base
    }
}

/// Key/description pairs rendered as `key` in accent and `description` muted.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(*description, theme.text_muted_style()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use ratatui::style::Modifier;

    use super::*;
    use crate::ui::theme::PaperTheme;

    #[test]
    fn focus_overrides_the_active_background() {
        let theme = PaperTheme::new();
        let style = menu_row_style(&theme, true, true);
        assert_eq!(style.bg, Some(theme.roles().selection_bg));
        assert!(style.add_modifier.contains(Modifier::BOLD));

        let idle = menu_row_style(&theme, false, false);
        assert_eq!(idle.fg, Some(theme.roles().text));
        assert_eq!(idle.bg, None);
    }

    #[test]
    fn hint_spans_alternate_key_and_description() {
        let theme = PaperTheme::new();
        let spans = build_hint_spans(&theme, &[("Esc", " Close "), ("Tab", " Next ")]);
        let text: Vec<&str> = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, vec!["Esc", " Close ", "Tab", " Next "]);
    }
}
