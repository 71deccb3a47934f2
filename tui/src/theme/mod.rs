//! Theme and Colors
//!
//! The terminal overlay palette: a dark screen with a green accent, plus the
//! softer colors of the page view underneath.

use overlay_core::LineStyle;
use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Terminal Palette
// ============================================================================

/// Accent green (prompt user, `~`, caret)
pub const TERMINAL_ACCENT: Color = Color::Rgb(110, 231, 140);

/// Dim gray for hints and the prompt host
pub const TERMINAL_DIM: Color = Color::Rgb(120, 120, 120);

/// Error red
pub const TERMINAL_ERROR: Color = Color::Rgb(255, 95, 95);

/// Regular output text
pub const TERMINAL_TEXT: Color = Color::Rgb(220, 220, 220);

// ============================================================================
// Page Palette
// ============================================================================

/// Body text of the page view
pub const PAGE_TEXT: Color = Color::Rgb(200, 200, 210);

/// Section headings of the page view
pub const PAGE_HEADING: Color = Color::Rgb(130, 180, 255);

/// Status bar text
pub const STATUS_TEXT: Color = Color::DarkGray;

/// Style for a scrollback row style
pub fn row_style(style: LineStyle) -> Style {
    match style {
        LineStyle::Normal => Style::default().fg(TERMINAL_TEXT),
        LineStyle::Dim => Style::default().fg(TERMINAL_DIM),
        LineStyle::Error => Style::default().fg(TERMINAL_ERROR),
        LineStyle::Accent => Style::default().fg(TERMINAL_ACCENT),
    }
}

/// Style for the "return to terminal" control
pub fn return_control_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(TERMINAL_ACCENT)
        .add_modifier(Modifier::BOLD)
}
