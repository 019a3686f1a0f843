//! Component system for the Folio TUI.
//!
//! Components are self-contained UI elements. Their persistent state lives on
//! [`App`] so focus can be rebuilt from it; the component itself translates
//! terminal input into state changes and [`Effect`]s and draws the result.

use crossterm::event::{KeyEvent, MouseEvent};
use folio_types::{Effect, Msg};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

pub(crate) trait Component {
    /// Application messages (route changes, ticks, resizes).
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Keyboard input routed to this component while it holds focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Mouse input; components hit-test against the areas they last rendered.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App);

    /// Key hints shown in the hint bar while this component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}
