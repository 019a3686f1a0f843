//! Layout and hit-testing helpers shared by the components.

use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

/// Centers a `width` x `height` box inside `area`, clamped to the area.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Rect covering `text` when drawn centered on the one-row `line`.
pub fn centered_text_rect(text: &str, line: Rect) -> Rect {
    let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    centered_box(width, line.height.min(1), line)
}

/// Index of the target under (`x`, `y`), if the point lies inside `container`.
pub fn find_target_index_by_mouse_position(container: &Rect, targets: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = Position::new(x, y);
    if !container.contains(position) {
        return None;
    }
    targets.iter().position(|target| target.contains(position))
}
