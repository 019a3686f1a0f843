use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use folio_types::Effect;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::Span,
    widgets::{Block, Padding, Paragraph},
};

use super::pages::page_lines;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

/// Draws the page for the current route next to the shell.
#[derive(Debug, Default)]
pub struct ContentComponent;

impl Component for ContentComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let page = app.content.page_size();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.content.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => app.content.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => app.content.scroll_by(page),
            KeyCode::PageUp => app.content.scroll_by(-page),
            KeyCode::Home => app.content.reset_scroll(),
            KeyCode::End => app.content.scroll_to_end(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if !app.content.last_area.contains(Position::new(mouse.column, mouse.row)) {
            return Vec::new();
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => app.content.scroll_by(3),
            MouseEventKind::ScrollUp => app.content.scroll_by(-3),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = Block::default()
            .style(th::page_style(theme))
            .padding(Padding::new(2, 2, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            app.content.last_area = Rect::default();
            return;
        }

        let lines = page_lines(&app.ctx.site, app.shell.current_route(), inner.width, theme);
        app.content.last_area = inner;
        app.content
            .set_content_height(u16::try_from(lines.len()).unwrap_or(u16::MAX));
        let paragraph = Paragraph::new(lines).scroll((app.content.scroll(), 0));
        frame.render_widget(paragraph, inner);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" ↑/↓", " Scroll "), ("PgUp/PgDn", " Page ")])
    }
}
