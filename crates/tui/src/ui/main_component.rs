use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use folio_types::{Effect, Msg};
use ratatui::{
    prelude::*,
    widgets::{Clear, Paragraph},
};

use super::components::{Component, ContentComponent, NavShellComponent};
use super::theme::theme_helpers as th;
use crate::app::App;

/// Root view: the content page underneath, the navigation panel on top and a
/// one-row hint bar at the bottom.
#[derive(Debug, Default)]
pub struct MainView {
    pub nav_view: NavShellComponent,
    pub content_view: ContentComponent,
}

impl MainView {
    /// Puts focus back on the menu after the focused widget disappeared.
    pub fn restore_focus(&mut self, app: &mut App) {
        match app.nav.preferred_focus() {
            Some(flag) => app.focus.focus(&flag),
            None => {
                app.focus.first();
            }
        }
    }

    fn content_focused(app: &App) -> bool {
        app.shows_content() && app.content.focus.get()
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        let mut effects = app.update(msg);
        effects.extend(self.nav_view.handle_message(app, msg));
        effects.extend(self.content_view.handle_message(app, msg));
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => {
                app.escape();
                return Vec::new();
            }
            KeyCode::Backspace => return vec![Effect::NavigateBack],
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Effect::ToggleReducedMotion];
            }
            KeyCode::Char('q') if key.modifiers.is_empty() => return vec![Effect::Quit],
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            _ => {}
        }

        if Self::content_focused(app) {
            return self.content_view.handle_key_events(app, key);
        }
        self.nav_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let effects = self.nav_view.handle_mouse_events(app, mouse);
        if !effects.is_empty() {
            return effects;
        }
        if app.shows_content() {
            return self.content_view.handle_mouse_events(app, mouse);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        let (panel_area, content_area, hints_area) = (layout[0], layout[1], layout[2]);

        // Content is drawn first so a widening panel slides over it.
        if content_area.width > 0 && app.shows_content() {
            self.content_view.render(frame, content_area, app);
        } else {
            app.content.last_area = Rect::default();
        }
        frame.render_widget(Clear, panel_area);
        self.nav_view.render(frame, panel_area, app);

        let hints_widget = Paragraph::new(Line::from(self.get_hint_spans(app))).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, hints_area);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        if Self::content_focused(app) {
            hint_spans.extend(self.content_view.get_hint_spans(app));
        } else {
            hint_spans.extend(self.nav_view.get_hint_spans(app));
        }
        hint_spans.extend(th::build_hint_spans(
            &*app.ctx.theme,
            &[
                ("Tab", " Focus "),
                ("Esc", " Close "),
                ("Bksp", " Back "),
                ("Ctrl+R", " Motion "),
                ("q", " Quit "),
            ],
        ));
        hint_spans
    }

    /// `[panel, content, hints]`, using the animated frame geometry.
    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let [main, hints] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        let shell_frame = app.frame(Instant::now());

        let panel = Rect {
            width: shell_frame.panel_width.min(main.width),
            ..main
        };
        let offset = shell_frame.content_offset.columns().min(main.width);
        let content = Rect {
            x: main.x + offset,
            width: main.width - offset,
            ..main
        };
        vec![panel, content, hints]
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::app::test_support::app_at;

    fn draw(app: &mut App, main_view: &mut MainView) -> Buffer {
        let (width, height) = app.viewport;
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|frame| main_view.render(frame, frame.area(), app))
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    fn screen(buffer: &Buffer) -> String {
        (0..buffer.area.height).map(|y| row(buffer, y)).collect::<Vec<_>>().join("\n")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn intro_fills_the_screen_without_content() {
        let mut app = app_at("/");
        let mut main_view = MainView::default();
        let buffer = draw(&mut app, &mut main_view);

        assert!(screen(&buffer).contains("Dana Example"));
        assert!(!screen(&buffer).contains("About Dana"));
        assert_eq!(app.content.last_area, Rect::default());
        assert!(row(&buffer, 29).starts_with("Hints: "));
    }

    #[test]
    fn sidebar_and_page_share_the_screen() {
        let mut app = app_at("/about");
        let mut main_view = MainView::default();
        let buffer = draw(&mut app, &mut main_view);

        assert_eq!(app.nav.last_area.width, 32);
        // Page padding is two columns on either side.
        assert_eq!(app.content.last_area.x, 34);
        assert_eq!(app.content.last_area.width, 64);
        assert!(screen(&buffer).contains("About Dana"));
    }

    #[test]
    fn global_keys_map_to_effects() {
        let mut app = app_at("/about");
        let mut main_view = MainView::default();

        assert_eq!(main_view.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);
        assert_eq!(
            main_view.handle_key_events(&mut app, key(KeyCode::Backspace)),
            vec![Effect::NavigateBack]
        );
        assert_eq!(
            main_view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            vec![Effect::ToggleReducedMotion]
        );
    }

    #[test]
    fn escape_from_a_sub_page_collapses_to_the_intro() {
        let mut app = app_at("/about");
        let mut main_view = MainView::default();
        main_view.handle_key_events(&mut app, key(KeyCode::Esc));
        assert!(!app.shows_content());

        let buffer = draw(&mut app, &mut main_view);
        assert_eq!(app.nav.last_area.width, 100);
        assert!(!screen(&buffer).contains("About Dana"));
    }

    #[test]
    fn keys_follow_focus_between_menu_and_page() {
        let mut app = app_at("/about");
        let mut main_view = MainView::default();
        app.content.last_area = Rect::new(32, 0, 68, 5);
        app.content.set_content_height(40);

        app.rebuild_focus();
        app.focus.focus(&app.content.focus.clone());
        main_view.handle_key_events(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.content.scroll(), 1);

        app.focus_entry("about");
        let effects = main_view.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::Navigate("/about".into())]);
        assert_eq!(app.content.scroll(), 1);
    }

    #[test]
    fn restore_focus_prefers_the_current_entry() {
        let mut app = app_at("/about");
        let mut main_view = MainView::default();
        app.rebuild_focus();
        main_view.restore_focus(&mut app);
        assert!(app.nav.flag_for("about").expect("flag").get());
    }
}
