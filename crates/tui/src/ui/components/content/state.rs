use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// Scroll and focus state of the content area.
#[derive(Debug, Clone)]
pub struct ContentState {
    pub focus: FocusFlag,
    scroll: u16,
    /// Lines produced by the last render.
    content_height: u16,
    pub last_area: Rect,
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            focus: FocusFlag::named("content"),
            scroll: 0,
            content_height: 0,
            last_area: Rect::default(),
        }
    }
}

impl ContentState {
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// New page: start from the top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    pub fn set_content_height(&mut self, height: u16) {
        self.content_height = height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = i32::from(self.scroll).saturating_add(delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = u16::try_from(next).unwrap_or(0);
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn page_size(&self) -> i32 {
        i32::from(self.last_area.height.saturating_sub(1).max(1))
    }

    fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.last_area.height)
    }
}

impl HasFocus for ContentState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
