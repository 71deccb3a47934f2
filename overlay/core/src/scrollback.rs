//! Scrollback
//!
//! The ordered log of rows shown in the terminal view. Rows are only ever
//! appended; the one exception is [`Scrollback::clear`], which empties the
//! whole log at once.

use serde::{Deserialize, Serialize};

/// Visual style of a single-line row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Regular output
    #[default]
    Normal,
    /// De-emphasized hints and completion candidates
    Dim,
    /// Errors
    Error,
    /// Highlighted text
    Accent,
}

impl LineStyle {
    /// CSS class for this style (empty for normal rows)
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            LineStyle::Normal => "",
            LineStyle::Dim => "tl-dim",
            LineStyle::Error => "tl-error",
            LineStyle::Accent => "tl-accent",
        }
    }
}

/// The synthetic shell prompt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// User part, e.g. `guest`
    pub user: String,
    /// Host part, e.g. `ali-site`
    pub host: String,
}

impl Default for Prompt {
    fn default() -> Self {
        Self {
            user: "guest".to_string(),
            host: "ali-site".to_string(),
        }
    }
}

impl Prompt {
    /// Create a prompt
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
        }
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:~$", self.user, self.host)
    }
}

/// One entry in the scrollback
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Row {
    /// Single line of output
    Line {
        /// Text of the line
        text: String,
        /// Visual style
        style: LineStyle,
    },
    /// Multi-line output kept together as one row
    Block {
        /// Text, possibly with embedded newlines
        text: String,
    },
    /// Echo of a submitted input line
    Echo {
        /// Prompt shown before the input
        prompt: Prompt,
        /// Submitted input, markup-escaped
        input: String,
    },
}

impl Row {
    /// Plain text of the row as the user reads it
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Row::Line { text, .. } | Row::Block { text } => text.clone(),
            Row::Echo { prompt, input } => format!("{prompt} {input}"),
        }
    }

    /// Style of the row
    #[must_use]
    pub fn style(&self) -> LineStyle {
        match self {
            Row::Line { style, .. } => *style,
            Row::Block { .. } | Row::Echo { .. } => LineStyle::Normal,
        }
    }

    /// Whether this is a multi-line block
    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(self, Row::Block { .. })
    }

    /// HTML fragment for a web host
    ///
    /// Text is always escaped; only the prompt itself carries markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        let class = match self.style().css_class() {
            "" => "tl-row".to_string(),
            extra => format!("tl-row {extra}"),
        };

        let body = match self {
            Row::Line { text, .. } | Row::Block { text } => escape_html(text),
            Row::Echo { prompt, input } => format!(
                "<span class=\"tl-accent\">{}</span>@<span class=\"tl-dim\">{}</span>:<span class=\"tl-accent\">~</span>$ {}",
                escape_html(&prompt.user),
                escape_html(&prompt.host),
                input
            ),
        };

        format!("<div class=\"{class}\">{body}</div>")
    }
}

/// Ordered, append-only log of rows
#[derive(Clone, Debug, Default)]
pub struct Scrollback {
    rows: Vec<Row>,
}

impl Scrollback {
    /// Create an empty scrollback
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single styled line
    pub fn append_line(&mut self, text: impl Into<String>, style: LineStyle) -> &Row {
        self.push(Row::Line {
            text: text.into(),
            style,
        })
    }

    /// Append one multi-line block
    pub fn append_block(&mut self, text: impl Into<String>) -> &Row {
        self.push(Row::Block { text: text.into() })
    }

    /// Append a prompt echo of `raw_input`, escaping any markup
    pub fn echo_prompt(&mut self, prompt: &Prompt, raw_input: &str) -> &Row {
        self.push(Row::Echo {
            prompt: prompt.clone(),
            input: escape_html(raw_input),
        })
    }

    /// Remove every row
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// All rows, oldest first
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Most recent row
    #[must_use]
    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whole scrollback as HTML rows
    #[must_use]
    pub fn to_html(&self) -> String {
        self.rows.iter().map(Row::to_html).collect::<Vec<_>>().join("\n")
    }

    fn push(&mut self, row: Row) -> &Row {
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }
}

/// Escape `& < > " '` for safe display; nothing else is altered
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}
