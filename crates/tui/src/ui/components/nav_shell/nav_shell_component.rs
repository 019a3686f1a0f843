use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use folio_nav::ShellMode;
use folio_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::menu_rows::MenuRow;
use super::state::NavTarget;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::{centered_box, centered_text_rect};

/// Draws the navigation shell: the intro panel at the site root, the sidebar
/// everywhere else.
#[derive(Debug, Default)]
pub struct NavShellComponent;

/// Rows taken by the intro block: name, optional tagline, a gap, then the menu.
fn intro_height(has_tagline: bool, menu_rows: usize) -> u16 {
    let row_count = u16::try_from(menu_rows).unwrap_or(u16::MAX);
    u16::from(has_tagline).saturating_add(2).saturating_add(row_count)
}

impl NavShellComponent {
    fn focus_flag(app: &mut App, flag: Option<rat_focus::FocusFlag>) {
        if let Some(flag) = flag {
            app.focus.focus(&flag);
        }
    }

    fn render_intro(&self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        frame.render_widget(Block::default().style(th::panel_style(theme)), area);

        let profile = &app.ctx.site.profile;
        let height = intro_height(profile.tagline.is_some(), app.nav.rows.len());
        let block = centered_box(area.width, height, area);

        let mut y = block.y;
        let line_at = |y: u16| Rect::new(block.x, y, block.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(profile.name.clone(), theme.heading_style())).centered(),
            line_at(y),
        );
        y += 1;
        if let Some(tagline) = profile.tagline.as_deref() {
            frame.render_widget(
                Paragraph::new(Span::styled(tagline.to_string(), theme.text_muted_style())).centered(),
                line_at(y),
            );
            y += 1;
        }
        y += 1;

        let mut row_areas = Vec::with_capacity(app.nav.rows.len());
        for row in &app.nav.rows {
            if y >= block.bottom() {
                row_areas.push(Rect::default());
                continue;
            }
            let text = row_text(row);
            let rect = centered_text_rect(&text, line_at(y));
            let style = th::menu_row_style(theme, row.active || row.current, app.nav.is_focused(&row.entry_id));
            frame.render_widget(Paragraph::new(Span::styled(text, style)), rect);
            row_areas.push(rect);
            y += 1;
        }
        app.nav.header_area = Rect::default();
        app.nav.row_areas = row_areas;
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        // The panel edge lights up while the menu holds focus.
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(theme.border_style(app.nav.focused_target().is_some()))
            .style(th::panel_style(theme))
            .padding(Padding::new(1, 1, 1, 1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let site = &app.ctx.site;
        let social_links = site.ordered_social_links();
        let footer_height = u16::try_from(social_links.len()).unwrap_or(u16::MAX).saturating_add(2);
        let [header_area, _, menu_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(footer_height),
        ])
        .areas(inner);

        let header_style = if app.nav.header_focus.get() {
            theme.heading_style().patch(theme.selection_style())
        } else {
            theme.heading_style()
        };
        let name_rect = Rect {
            width: header_area
                .width
                .min(u16::try_from(unicode_width::UnicodeWidthStr::width(site.profile.name.as_str())).unwrap_or(u16::MAX)),
            ..header_area
        };
        frame.render_widget(Paragraph::new(Span::styled(site.profile.name.clone(), header_style)), name_rect);

        let mut row_areas = Vec::with_capacity(app.nav.rows.len());
        for (offset, row) in app.nav.rows.iter().enumerate() {
            let y = menu_area.y.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
            if y >= menu_area.bottom() {
                row_areas.push(Rect::default());
                continue;
            }
            let rect = Rect::new(menu_area.x, y, menu_area.width, 1);
            let style = th::menu_row_style(theme, row.active || row.current, app.nav.is_focused(&row.entry_id));
            let style = if row.current { style.add_modifier(Modifier::UNDERLINED) } else { style };
            frame.render_widget(Paragraph::new(Span::styled(row_text(row), style)), rect);
            row_areas.push(rect);
        }

        let mut footer: Vec<Line> = social_links
            .iter()
            .map(|link| Line::from(Span::styled(link.platform.clone(), theme.link_style())))
            .collect();
        footer.push(Line::from(Span::styled(
            "─".repeat(usize::from(footer_area.width)),
            theme.divider_style(),
        )));
        footer.push(Line::from(Span::styled(
            format!("© {} {}", chrono::Local::now().year(), site.profile.name),
            theme.text_muted_style(),
        )));
        frame.render_widget(Paragraph::new(footer), footer_area);

        app.nav.header_area = name_rect;
        app.nav.row_areas = row_areas;
    }
}

/// Cursor, indentation, expand indicator, icon and label for one row.
fn row_text(row: &MenuRow) -> String {
    let cursor = if row.current { "› " } else { "  " };
    let indent = "  ".repeat(usize::from(row.depth));
    let indicator = match row.expanded {
        Some(true) => "▾ ",
        Some(false) => "▸ ",
        None => "",
    };
    let icon = row.icon.as_deref().map(|icon| format!("{icon} ")).unwrap_or_default();
    format!("{cursor}{indent}{indicator}{icon}{}", row.label)
}

impl Component for NavShellComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let flag = app.nav.cycle_focus(true);
                Self::focus_flag(app, flag);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let flag = app.nav.cycle_focus(false);
                Self::focus_flag(app, flag);
            }
            KeyCode::Home => {
                let flag = app.nav.edge_focus(false);
                Self::focus_flag(app, flag);
            }
            KeyCode::End => {
                let flag = app.nav.edge_focus(true);
                Self::focus_flag(app, flag);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(target) = app.nav.focused_target() {
                    return app.activate_target(&target);
                }
            }
            // Right opens a collapsed submenu, Left closes it or climbs to the
            // parent. Neither visits the parent's page.
            KeyCode::Right => {
                if let Some(NavTarget::Entry(id)) = app.nav.focused_target()
                    && app.nav.rows.iter().any(|row| row.entry_id == id && row.expanded == Some(false))
                {
                    app.toggle_submenu(&id);
                }
            }
            KeyCode::Left => {
                if let Some(NavTarget::Entry(id)) = app.nav.focused_target() {
                    if app.nav.rows.iter().any(|row| row.entry_id == id && row.expanded == Some(true)) {
                        app.toggle_submenu(&id);
                        return Vec::new();
                    }
                    let parent = app.shell.tree().parent_of(&id).map(|parent| parent.id.clone());
                    let flag = parent.and_then(|parent| app.nav.flag_for(&parent).cloned());
                    Self::focus_flag(app, flag);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let Some(target) = app.nav.target_at(mouse.column, mouse.row) else {
            return Vec::new();
        };
        let flag = app.nav.flag_for_target(&target);
        Self::focus_flag(app, flag);
        app.activate_target(&target)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        app.nav.last_area = area;
        if area.width == 0 || area.height == 0 {
            app.nav.header_area = Rect::default();
            app.nav.row_areas.clear();
            return;
        }
        match app.shell.mode() {
            ShellMode::Intro => self.render_intro(frame, area, app),
            ShellMode::Sidebar => self.render_sidebar(frame, area, app),
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.ctx.theme;
        let focused_row = match app.nav.focused_target() {
            Some(NavTarget::Entry(id)) => app.nav.rows.iter().find(|row| row.entry_id == id),
            _ => None,
        };
        // Parents also toggle the submenu they control.
        let enter_hint = match focused_row {
            Some(row) if row.controls.is_some() => " Open+toggle ",
            _ => " Open ",
        };
        let mut spans = th::build_hint_spans(theme, &[(" ↑/↓", " Move "), ("Enter", enter_hint), ("←/→", " Submenu ")]);
        if let Some(row) = focused_row {
            spans.push(Span::styled(format!("→ {} ", row.target), theme.text_secondary_style()));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::app::test_support::app_at;

    fn render(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|frame| NavShellComponent.render(frame, frame.area(), app))
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| (area.left()..area.right()).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn intro_centers_name_and_top_level_entries() {
        let mut app = app_at("/");
        let lines = rows(&render(&mut app, 60, 20));
        let name_line = lines.iter().find(|line| line.contains("Dana Example")).expect("profile name");
        assert!(name_line.starts_with("    "));
        assert!(lines.iter().any(|line| line.contains("▸ Work")));
        assert!(lines.iter().any(|line| line.contains("About")));
        assert!(!lines.iter().any(|line| line.contains("Resume")));
        assert!(!lines.iter().any(|line| line.contains('©')));
    }

    #[test]
    fn sidebar_shows_the_open_submenu_and_footer() {
        let mut app = app_at("/work/resume");
        let lines = rows(&render(&mut app, 32, 20));
        assert!(lines[1].contains("Dana Example"));
        assert!(lines.iter().any(|line| line.contains("▾ Work")));
        assert!(lines.iter().any(|line| line.contains("›   Resume")));
        assert!(lines.iter().any(|line| line.contains("github")));
        assert!(lines.iter().any(|line| line.contains('©')));
        assert_eq!(app.nav.row_areas.len(), app.nav.rows.len());
    }

    #[test]
    fn enter_on_a_leaf_requests_navigation() {
        let mut app = app_at("/work/resume");
        render(&mut app, 32, 20);
        app.focus_entry("about");

        let effects = NavShellComponent.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::Navigate("/about".into())]);
    }

    #[test]
    fn enter_on_a_parent_toggles_its_submenu_and_opens_its_page() {
        let mut app = app_at("/about");
        render(&mut app, 32, 20);
        app.focus_entry("work");

        let effects = NavShellComponent.handle_key_events(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(effects, vec![Effect::Navigate("/work".into())]);
        assert_eq!(app.shell.state().visible_submenu_id(), Some("work"));
        assert!(app.nav.rows.iter().any(|row| row.entry_id == "resume"));

        let effects = NavShellComponent.handle_key_events(&mut app, key(KeyCode::Left));
        assert!(effects.is_empty());
        assert_eq!(app.shell.state().visible_submenu_id(), None);

        let effects = NavShellComponent.handle_key_events(&mut app, key(KeyCode::Right));
        assert!(effects.is_empty());
        assert_eq!(app.shell.state().visible_submenu_id(), Some("work"));
        assert_eq!(app.shell.current_route(), "/about");
    }

    #[test]
    fn sidebar_edge_follows_menu_focus() {
        let mut app = app_at("/about");
        let buffer = render(&mut app, 32, 20);
        assert_eq!(buffer[(31, 5)].fg, app.ctx.theme.roles().border);

        app.focus_entry("about");
        let buffer = render(&mut app, 32, 20);
        assert_eq!(buffer[(31, 5)].fg, app.ctx.theme.roles().focus);
    }

    #[test]
    fn intro_height_saturates_instead_of_overflowing() {
        assert_eq!(intro_height(true, 3), 6);
        assert_eq!(intro_height(false, 0), 2);
        assert_eq!(intro_height(true, usize::MAX), u16::MAX);
    }

    #[test]
    fn hints_describe_the_focused_row() {
        let mut app = app_at("/about");
        render(&mut app, 32, 20);
        let text = |app: &App| -> String {
            NavShellComponent
                .get_hint_spans(app)
                .iter()
                .map(|span| span.content.to_string())
                .collect()
        };

        app.focus_entry("work");
        let hints = text(&app);
        assert!(hints.contains("Open+toggle"));
        assert!(hints.contains("→ /work"));
        app.focus_entry("about");
        let hints = text(&app);
        assert!(hints.contains(" Open "));
        assert!(hints.contains("→ /about"));
    }

    #[test]
    fn clicking_a_row_activates_it() {
        let mut app = app_at("/about");
        render(&mut app, 32, 20);
        let work = app.nav.rows.iter().position(|row| row.entry_id == "work").expect("work row");
        let area = app.nav.row_areas[work];

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 1,
            row: area.y,
            modifiers: KeyModifiers::NONE,
        };
        let effects = NavShellComponent.handle_mouse_events(&mut app, click);
        assert_eq!(effects, vec![Effect::Navigate("/work".into())]);
        assert_eq!(app.shell.state().visible_submenu_id(), Some("work"));
    }

    #[test]
    fn clicking_the_header_goes_home() {
        let mut app = app_at("/about");
        render(&mut app, 32, 20);
        let header = app.nav.header_area;
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: header.x,
            row: header.y,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            NavShellComponent.handle_mouse_events(&mut app, click),
            vec![Effect::Navigate("/".into())]
        );
    }
}
