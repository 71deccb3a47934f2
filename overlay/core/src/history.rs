//! Input History
//!
//! Submitted lines plus a recall cursor. The cursor lives in
//! `[0, len]`, where `len` means "past the end": a fresh line that has not
//! been recalled from history.

/// Session-local input history
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and move the cursor past the end
    ///
    /// Blank lines are recorded too.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = self.entries.len();
    }

    /// Step back one entry
    ///
    /// Returns the recalled line, or `None` when already at the oldest entry.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward one entry
    ///
    /// Returns the recalled line (empty once past the end), or `None` when
    /// the cursor is already past the end.
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Line under the cursor; empty when past the end
    #[must_use]
    pub fn current(&self) -> &str {
        self.entries.get(self.cursor).map_or("", String::as_str)
    }

    /// Cursor position in `[0, len]`
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All recorded lines, oldest first
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of recorded lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been submitted yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
