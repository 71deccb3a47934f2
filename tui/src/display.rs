//! Display State
//!
//! The TUI is a thin client: it mirrors what the controller tells it through
//! [`OverlayMessage`]s and renders from that mirror. Nothing here reads
//! controller internals.

use overlay_core::{LineStyle, OverlayMessage, Prompt, Row};

/// A scrollback row as the TUI draws it
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayRow {
    /// Plain output, possibly spanning several lines
    Text {
        /// Text as the user reads it
        text: String,
        /// Visual style
        style: LineStyle,
    },
    /// Prompt echo, drawn with a colored prompt
    Echo {
        /// Prompt shown before the input
        prompt: Prompt,
        /// Input exactly as typed
        input: String,
    },
}

impl DisplayRow {
    /// Plain text of the row
    pub fn plain_text(&self) -> String {
        match self {
            DisplayRow::Text { text, .. } => text.clone(),
            DisplayRow::Echo { prompt, input } => format!("{prompt} {input}"),
        }
    }
}

impl From<&Row> for DisplayRow {
    fn from(row: &Row) -> Self {
        match row {
            Row::Line { text, style } => DisplayRow::Text {
                text: text.clone(),
                style: *style,
            },
            Row::Block { text } => DisplayRow::Text {
                text: text.clone(),
                style: LineStyle::Normal,
            },
            Row::Echo { prompt, input } => DisplayRow::Echo {
                prompt: prompt.clone(),
                input: unescape_html(input),
            },
        }
    }
}

/// Undo the markup escaping applied to prompt echoes
///
/// `&amp;` is replaced last so escaped entities in the input survive.
pub fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

/// Everything the TUI needs to draw the overlay
#[derive(Debug)]
pub struct DisplayState {
    /// Mirrored scrollback
    pub rows: Vec<DisplayRow>,
    /// Whether the overlay covers the page
    pub overlay_visible: bool,
    /// Whether the "return to terminal" control is shown
    pub return_visible: bool,
    /// Current input line
    pub input: String,
    /// Caret position in characters
    pub caret: usize,
    /// Whether the input line has focus
    pub focused: bool,
    /// Set when the newest row should be brought into view
    pub follow_latest: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            overlay_visible: true,
            return_visible: false,
            input: String::new(),
            caret: 0,
            focused: true,
            follow_latest: true,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a batch of messages in order
    pub fn apply_all(&mut self, messages: impl IntoIterator<Item = OverlayMessage>) {
        for msg in messages {
            self.apply_message(msg);
        }
    }

    /// Apply one message from the controller
    pub fn apply_message(&mut self, msg: OverlayMessage) {
        match msg {
            OverlayMessage::RowAppended(row) => {
                self.rows.push(DisplayRow::from(&row));
            }
            OverlayMessage::Cleared => {
                self.rows.clear();
            }
            OverlayMessage::ScrollToLatest => {
                self.follow_latest = true;
            }
            OverlayMessage::OverlayVisibility { visible } => {
                self.overlay_visible = visible;
                if !visible {
                    self.focused = false;
                }
            }
            OverlayMessage::ReturnControl { visible } => {
                self.return_visible = visible;
            }
            OverlayMessage::InputChanged { value } => {
                let was_at_end = self.caret >= self.input_len();
                self.input = value;
                let len = self.input_len();
                self.caret = if was_at_end { len } else { self.caret.min(len) };
            }
            OverlayMessage::CaretToEnd => {
                self.caret = self.input_len();
            }
            OverlayMessage::FocusInput => {
                self.focused = true;
            }
        }
    }

    /// Input length in characters
    pub fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Scrollback as plain text, one row per entry
    pub fn transcript(&self) -> String {
        self.rows
            .iter()
            .map(DisplayRow::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
