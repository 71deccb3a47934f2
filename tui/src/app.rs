//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize, caret blink)
//! - TerminalController for command handling
//! - DisplayState for rendering
//!
//! Terminal events become controller events, the controller's messages
//! update the DisplayState, and every frame is drawn from that state through
//! the compositor.

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{Event, EventStream, MouseButton, MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::StatefulWidget;
use ratatui::Terminal;

use overlay_core::{OverlayEvent, PortfolioPage, Prompt, TerminalController};

use crate::compositor::{Compositor, LayerId, Occlusion};
use crate::display::{DisplayRow, DisplayState};
use crate::keys::{map_key, KeyAction};
use crate::page_view::page_lines;
use crate::theme::{
    return_control_style, row_style, STATUS_TEXT, TERMINAL_ACCENT, TERMINAL_DIM, TERMINAL_TEXT,
};
use crate::widgets::{TextBlock, TextBlockState};

/// Caret blink period
const CARET_BLINK: Duration = Duration::from_millis(530);

/// Label of the "return to terminal" control
pub const RETURN_LABEL: &str = " >_ Return to terminal ";

/// Mouse wheel step
const WHEEL_STEP: i32 = 3;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Overlay Integration ===
    /// The terminal overlay controller
    controller: TerminalController<PortfolioPage>,
    /// Display state derived from OverlayMessages
    display: DisplayState,
    /// Page file for reloads
    page_path: Option<PathBuf>,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Rendered page text
    page_lines: Vec<Line<'static>>,

    // === View State ===
    /// Scrollback scroll position
    overlay_scroll: TextBlockState,
    /// Page view scroll position
    page_scroll: TextBlockState,
    /// Caret blink phase
    caret_on: bool,
    /// One-line notice in the status bar
    notice: Option<String>,
    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    page: LayerId,
    status: LayerId,
    overlay: LayerId,
    return_control: LayerId,
}

impl App {
    /// Create a new App around a booted controller
    pub fn new(
        mut controller: TerminalController<PortfolioPage>,
        page_path: Option<PathBuf>,
        size: (u16, u16),
    ) -> Self {
        let area = Rect::new(0, 0, size.0, size.1);
        let mut compositor = Compositor::new(area);

        let page = compositor.create_layer(page_area(area), 0, Occlusion::Transparent);
        let status = compositor.create_layer(status_area(area), 5, Occlusion::Solid);
        let overlay = compositor.create_layer(area, 10, Occlusion::Solid);
        let return_control = compositor.create_layer(return_area(area), 50, Occlusion::Solid);

        let mut display = DisplayState::new();
        display.apply_all(controller.drain_messages());

        let page_lines = page_lines(controller.page());

        let mut app = Self {
            running: true,
            controller,
            display,
            page_path,
            compositor,
            layers: AppLayers {
                page,
                status,
                overlay,
                return_control,
            },
            page_lines,
            overlay_scroll: TextBlockState::following(),
            page_scroll: TextBlockState::default(),
            caret_on: true,
            notice: None,
            size,
        };
        app.sync_layers();
        app
    }

    /// Run the event loop until the user quits
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be drawn or its event stream
    /// fails.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut blink = tokio::time::interval(CARET_BLINK);

        self.render(terminal)?;

        while self.running {
            tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },

                _ = blink.tick() => {
                    self.caret_on = !self.caret_on;
                }
            }

            self.render(terminal)?;
        }

        tracing::info!(
            submitted = self.controller.history().len(),
            "Portfolio terminal closed"
        );
        Ok(())
    }

    /// Whether the app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The controller behind the overlay
    pub fn controller(&self) -> &TerminalController<PortfolioPage> {
        &self.controller
    }

    /// Status bar notice, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle one terminal event
    pub fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                let action = map_key(key, self.display.overlay_visible);
                self.perform(action);
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    fn perform(&mut self, action: KeyAction) {
        match action {
            KeyAction::Overlay(event) => {
                self.controller.handle_event(event);
            }
            KeyAction::InsertChar(c) => self.controller.insert_char(c),
            KeyAction::Backspace => self.controller.backspace(),
            KeyAction::Scroll(delta) => self.scroll(delta),
            KeyAction::Reload => self.reload_page(),
            KeyAction::Quit => self.running = false,
            KeyAction::None => {}
        }
        self.sync();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.compositor.layer_at(mouse.column, mouse.row);
                if hit == Some(self.layers.return_control) {
                    self.controller.handle_event(OverlayEvent::Return);
                } else if hit == Some(self.layers.overlay) {
                    self.controller.handle_event(OverlayEvent::Click);
                }
                self.sync();
            }
            MouseEventKind::ScrollUp => self.scroll(-WHEEL_STEP),
            MouseEventKind::ScrollDown => self.scroll(WHEEL_STEP),
            _ => {}
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let area = Rect::new(0, 0, width, height);

        self.compositor.resize(area);
        self.compositor.place_layer(self.layers.page, page_area(area));
        self.compositor
            .place_layer(self.layers.status, status_area(area));
        self.compositor.place_layer(self.layers.overlay, area);
        self.compositor
            .place_layer(self.layers.return_control, return_area(area));
    }

    fn scroll(&mut self, delta: i32) {
        if self.display.overlay_visible {
            self.overlay_scroll.scroll(delta);
        } else {
            self.page_scroll.scroll(delta);
        }
    }

    fn reload_page(&mut self) {
        let Some(path) = self.page_path.clone() else {
            self.notice = Some("No page file to reload".to_string());
            return;
        };

        match PortfolioPage::load(&path) {
            Ok(page) => {
                self.page_lines = page_lines(&page);
                self.controller.replace_page(page);
                self.notice = Some(format!("Reloaded {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Page reload failed");
                self.notice = Some(format!("Reload failed: {e}"));
            }
        }
    }

    /// Pull pending controller messages into the display state
    fn sync(&mut self) {
        self.display.apply_all(self.controller.drain_messages());

        if self.display.follow_latest {
            self.overlay_scroll.scroll_to_bottom();
            self.display.follow_latest = false;
        }
        self.sync_layers();
    }

    fn sync_layers(&mut self) {
        let overlay_visible = self.display.overlay_visible;
        self.compositor
            .set_visible(self.layers.overlay, overlay_visible);
        self.compositor
            .set_visible(self.layers.status, !overlay_visible);
        self.compositor
            .set_visible(self.layers.return_control, self.display.return_visible);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draw one frame
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal backend fails to draw.
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.render_page();
        self.render_status();
        self.render_overlay();
        self.render_return_control();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    let idx = output.index_of(x, y);
                    if let Some(cell) = output.content.get(idx) {
                        buf[(x, y)] = cell.clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    fn render_page(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.page) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        TextBlock::new(&self.page_lines).render(area, buf, &mut self.page_scroll);
    }

    fn render_status(&mut self) {
        let text = match &self.notice {
            Some(notice) => format!(" {notice}"),
            None => " t/Esc: terminal  PgUp/PgDn: scroll  F5: reload  q: quit".to_string(),
        };

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        buf.set_stringn(
            0,
            0,
            &text,
            area.width as usize,
            Style::default().fg(STATUS_TEXT),
        );
    }

    fn render_overlay(&mut self) {
        if !self.display.overlay_visible {
            return;
        }

        let rows: Vec<Line<'static>> = self.display.rows.iter().flat_map(row_lines).collect();
        let input_line = self.input_line();

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.overlay) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height == 0 {
            return;
        }

        let scrollback_area = Rect::new(0, 0, area.width, area.height - 1);
        TextBlock::new(&rows).render(scrollback_area, buf, &mut self.overlay_scroll);

        if let Some(line) = crate::widgets::wrap_line(&input_line, area.width as usize).pop() {
            buf.set_line(0, area.height - 1, &line, area.width);
        }
    }

    fn render_return_control(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.return_control) else {
            return;
        };
        buf.reset();
        let width = buf.area.width as usize;
        buf.set_stringn(0, 0, RETURN_LABEL, width, return_control_style());
    }

    /// Prompt plus the input line, with the caret drawn in place
    fn input_line(&self) -> Line<'static> {
        let mut spans = prompt_spans(self.controller.prompt());
        spans.push(Span::raw(" "));

        let text_style = Style::default().fg(TERMINAL_TEXT);
        let chars: Vec<char> = self.display.input.chars().collect();
        let caret = self.display.caret.min(chars.len());

        let before: String = chars[..caret].iter().collect();
        let under = chars.get(caret).map_or_else(|| " ".to_string(), char::to_string);
        let after: String = chars.get(caret + 1..).map(|c| c.iter().collect()).unwrap_or_default();

        let caret_style = if self.caret_on && self.display.focused {
            Style::default().fg(TERMINAL_TEXT).bg(TERMINAL_ACCENT)
        } else {
            text_style
        };

        spans.push(Span::styled(before, text_style));
        spans.push(Span::styled(under, caret_style));
        spans.push(Span::styled(after, text_style));
        Line::from(spans)
    }
}

// =============================================================================
// Row Rendering
// =============================================================================

/// Prompt drawn as `user@host:~$` with the accent on user and `~`
pub fn prompt_spans(prompt: &Prompt) -> Vec<Span<'static>> {
    let accent = Style::default()
        .fg(TERMINAL_ACCENT)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(TERMINAL_DIM);
    let plain = Style::default().fg(TERMINAL_TEXT);

    vec![
        Span::styled(prompt.user.clone(), accent),
        Span::styled("@", plain),
        Span::styled(prompt.host.clone(), dim),
        Span::styled(":", plain),
        Span::styled("~", accent),
        Span::styled("$", plain),
    ]
}

/// Styled lines for one scrollback row
pub fn row_lines(row: &DisplayRow) -> Vec<Line<'static>> {
    match row {
        DisplayRow::Text { text, style } => {
            let style = row_style(*style);
            text.split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), style)))
                .collect()
        }
        DisplayRow::Echo { prompt, input } => {
            let mut spans = prompt_spans(prompt);
            spans.push(Span::styled(
                format!(" {input}"),
                Style::default().fg(TERMINAL_TEXT),
            ));
            vec![Line::from(spans)]
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

fn page_area(area: Rect) -> Rect {
    Rect::new(0, 0, area.width, area.height.saturating_sub(1))
}

fn status_area(area: Rect) -> Rect {
    Rect::new(0, area.height.saturating_sub(1), area.width, area.height.min(1))
}

fn return_area(area: Rect) -> Rect {
    #[allow(clippy::cast_possible_truncation)]
    let label_width = (RETURN_LABEL.chars().count() as u16).min(area.width);
    Rect::new(area.width - label_width, 0, label_width, area.height.min(1))
}
