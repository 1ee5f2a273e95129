//! Clickable UI building blocks.
//!
//! Each component renders and registers its own click targets, so the rows a
//! player taps always match the rows that were drawn.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A single-row tab strip. Each tab's target covers its padded label plus the
/// separator that follows it; the last tab runs to the right edge.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Column spans `(x, width, action_id)` of each tab, relative to `x0`.
    fn spans(&self, x0: u16, total_width: u16) -> Vec<(u16, u16, u16)> {
        let sep = Line::from(self.separator).width() as u16;
        let mut out = Vec::with_capacity(self.tabs.len());
        let mut cursor = 0u16;
        for (i, (label, _, action_id)) in self.tabs.iter().enumerate() {
            let w = Line::from(format!(" {} ", label)).width() as u16;
            let width = if i + 1 == self.tabs.len() {
                total_width.saturating_sub(cursor)
            } else {
                w + sep
            };
            out.push((x0 + cursor, width, *action_id));
            cursor += w + sep;
        }
        out
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let targets = self.spans(inner.x, inner.width);

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(format!(" {} ", label), *style));
        }

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Full outer height for tap tolerance
        for (x, w, action_id) in targets {
            if w > 0 {
                cs.add_click_target(Rect::new(x, area.y, w, area.height.max(1)), action_id);
            }
        }
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Pairs rendered [`Line`]s with click actions. Push lines in display order,
/// then call [`register_targets`](ClickableList::register_targets) once with
/// the area they were rendered into.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line bound to `action_id`.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every clickable line that is visible.
    ///
    /// * `top_offset` / `bottom_offset` — border rows above and below the content.
    /// * `scroll` — rows scrolled off the top. Lines are assumed not to wrap.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            if line_idx < scroll {
                continue;
            }
            let row = content_y + (line_idx - scroll);
            if row < content_end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

impl Default for ClickableList<'_> {
    fn default() -> Self {
        Self::new()
    }
}
