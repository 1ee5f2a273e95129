//! Input normalization: keyboard and pointer events, click targets, and
//! pixel → terminal-cell conversion.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse and touch input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press from keyboard.
    Key(char),
    /// A tap on a registered target, identified by a semantic action ID
    /// (see `fishtank::actions`).
    Click(u16),
}

/// A region on screen that triggers an action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render loop (which registers targets every frame) and
/// the mouse handler (which hit-tests them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target on `row`, if the row lies inside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action of the topmost target under the cell. Later registrations sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}

/// Narrow screens stack the log under the main panel instead of beside it.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 80
}

/// Convert a pixel offset inside the grid container to a cell index along one axis.
///
/// Returns `None` if the offset falls outside the grid or the inputs are degenerate.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}
