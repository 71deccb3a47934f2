//! TextBlock Widget
//!
//! A borderless, scrollable region of styled lines. Single-span lines are
//! word-wrapped; lines made of several spans (prompt echoes) are hard-wrapped
//! by display column so each span keeps its style.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;
use unicode_width::UnicodeWidthChar;

/// State for a scrollable text block
#[derive(Debug, Default)]
pub struct TextBlockState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total content lines after wrapping
    pub total_lines: usize,
    /// Keep the newest line in view on every render
    pub follow: bool,
}

impl TextBlockState {
    /// State that keeps the newest line in view
    pub fn following() -> Self {
        Self {
            follow: true,
            ..Self::default()
        }
    }

    /// Scroll by delta (positive = down); stops following the newest line
    pub fn scroll(&mut self, delta: i32) {
        let new_offset = i64::try_from(self.scroll_offset).unwrap_or(i64::MAX) + i64::from(delta);
        self.scroll_offset = usize::try_from(new_offset.max(0)).unwrap_or(0);
        self.follow = false;
    }

    /// Scroll to the newest line and keep following it
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.total_lines.saturating_sub(1);
        self.follow = true;
    }
}

/// A borderless, scrollable text block
pub struct TextBlock<'a> {
    lines: &'a [Line<'static>],
}

impl<'a> TextBlock<'a> {
    pub fn new(lines: &'a [Line<'static>]) -> Self {
        Self { lines }
    }
}

impl StatefulWidget for TextBlock<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let width = area.width as usize;
        if width == 0 || area.height == 0 {
            return;
        }

        let wrapped: Vec<Line<'static>> = self
            .lines
            .iter()
            .flat_map(|line| wrap_line(line, width))
            .collect();

        state.total_lines = wrapped.len();

        let max_scroll = state.total_lines.saturating_sub(area.height as usize);
        state.scroll_offset = if state.follow {
            max_scroll
        } else {
            state.scroll_offset.min(max_scroll)
        };

        for (i, line) in wrapped
            .iter()
            .skip(state.scroll_offset)
            .take(area.height as usize)
            .enumerate()
        {
            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}

/// Wrap one styled line to `width` columns
pub fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    match line.spans.as_slice() {
        [] => vec![Line::default()],
        [span] => {
            if span.content.is_empty() {
                return vec![Line::default()];
            }
            wrap(&span.content, width)
                .into_iter()
                .map(|cow| Line::from(Span::styled(cow.into_owned(), span.style)))
                .collect()
        }
        spans => hard_wrap(spans, width),
    }
}

fn hard_wrap(spans: &[Span<'static>], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;

    for span in spans {
        let mut chunk = String::new();
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            // A character wider than the whole line still gets a line of its own
            if used > 0 && used + ch_width > width {
                if !chunk.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                lines.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            chunk.push(ch);
            used += ch_width;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, span.style));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}
