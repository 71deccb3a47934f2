//! Terminal Controller - The Overlay Core
//!
//! The controller owns everything the overlay shows: visibility, the input
//! line, the scrollback, and the input history. It reads page content through
//! [`PageContent`] and reports every visible change as an [`OverlayMessage`].
//!
//! # Design Philosophy
//!
//! The controller is host-agnostic. It doesn't know whether it is driven by a
//! browser, a terminal UI, or a test. Hosts call the synchronous handlers (or
//! [`TerminalController::handle_event`]) and then drain the outbound messages
//! to update their view. Every handler completes before returning.
//!
//! ```text
//!   host key/submit/click ──► OverlayEvent ──► TerminalController
//!                                                   │
//!                         PageContent ◄── reads ────┤
//!                                                   │
//!   host renderer ◄──────── OverlayMessage ◄────────┘
//! ```

use crate::commands::{
    command_token, Command, CommandOutcome, ENTER_CONFIRMATION, UNKNOWN_COMMAND_HINT,
};
use crate::config::TerminalConfig;
use crate::events::{KeyDisposition, OverlayEvent};
use crate::history::History;
use crate::messages::OverlayMessage;
use crate::page::PageContent;
use crate::scrollback::{LineStyle, Prompt, Row, Scrollback};

/// Whether the overlay covers the page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    /// The terminal is shown over the page
    #[default]
    Shown,
    /// The page is shown; the terminal can be reopened
    Hidden,
}

/// The terminal overlay controller
pub struct TerminalController<P: PageContent> {
    /// Read access to the page
    page: P,
    /// Prompt used for echoes
    prompt: Prompt,
    /// Rendered rows
    scrollback: Scrollback,
    /// Submitted lines and recall cursor
    history: History,
    /// Line currently being edited
    input: String,
    /// Overlay state
    visibility: Visibility,
    /// Whether the "return to terminal" control is shown
    return_control_visible: bool,
    /// Effects not yet picked up by the host
    outbox: Vec<OverlayMessage>,
}

impl<P: PageContent> TerminalController<P> {
    /// Boot the overlay on a page
    ///
    /// Returns `None` when the page has no overlay root; the component then
    /// stays inert. Otherwise the welcome banner is rendered.
    pub fn boot(page: P, config: &TerminalConfig) -> Option<Self> {
        if !page.has_overlay_root() {
            tracing::debug!("Page has no terminal root, overlay stays inert");
            return None;
        }

        let mut controller = Self {
            page,
            prompt: config.prompt.clone(),
            scrollback: Scrollback::new(),
            history: History::new(),
            input: String::new(),
            visibility: Visibility::Shown,
            return_control_visible: false,
            outbox: Vec::new(),
        };

        controller.append_block(config.banner_text());
        tracing::debug!(prompt = %controller.prompt, "Terminal overlay booted");

        Some(controller)
    }

    // =========================================================================
    // Event Dispatch
    // =========================================================================

    /// Dispatch a host event to its handler
    pub fn handle_event(&mut self, event: OverlayEvent) -> KeyDisposition {
        match event {
            OverlayEvent::Submit => {
                self.submit();
                KeyDisposition::Handled
            }
            OverlayEvent::Input(value) => {
                self.set_input(value);
                KeyDisposition::PassThrough
            }
            OverlayEvent::RecallPrevious => self.recall_previous(),
            OverlayEvent::RecallNext => self.recall_next(),
            OverlayEvent::Complete => self.complete(),
            OverlayEvent::Return => {
                self.return_to_terminal();
                KeyDisposition::Handled
            }
            OverlayEvent::Click => {
                self.click();
                KeyDisposition::PassThrough
            }
        }
    }

    /// Submit the current input line
    ///
    /// The raw line is always recorded and echoed. Blank lines stop there;
    /// anything else is dispatched on its lowercased first token.
    pub fn submit(&mut self) {
        let value = std::mem::take(&mut self.input);

        self.history.push(value.clone());
        self.echo_prompt(&value);

        if let Some(name) = command_token(&value) {
            self.dispatch(&name);
        }

        self.outbox.push(OverlayMessage::InputChanged {
            value: String::new(),
        });
    }

    /// Replace the input line and submit it
    pub fn submit_line(&mut self, line: impl Into<String>) {
        self.input = line.into();
        self.submit();
    }

    fn dispatch(&mut self, name: &str) {
        let Some(command) = Command::lookup(name) else {
            tracing::debug!(name, "Unknown command");
            self.append_line(format!("command not found: {name}"), LineStyle::Error);
            self.append_line(UNKNOWN_COMMAND_HINT, LineStyle::Dim);
            return;
        };

        tracing::debug!(%command, "Running command");

        match command.run(&self.page) {
            CommandOutcome::Output(text) => self.append_block(text),
            CommandOutcome::EnterSite => {
                self.set_visibility(Visibility::Hidden);
                self.set_return_control(true);
                self.append_line(ENTER_CONFIRMATION, LineStyle::Normal);
            }
            CommandOutcome::ClearScreen => {
                self.scrollback.clear();
                self.outbox.push(OverlayMessage::Cleared);
            }
        }
    }

    // =========================================================================
    // History Recall
    // =========================================================================

    /// Recall the previous history entry (upward navigation key)
    pub fn recall_previous(&mut self) -> KeyDisposition {
        if let Some(line) = self.history.recall_previous() {
            let line = line.to_string();
            self.replace_input(line);
        }
        KeyDisposition::Handled
    }

    /// Recall the next history entry (downward navigation key)
    pub fn recall_next(&mut self) -> KeyDisposition {
        if let Some(line) = self.history.recall_next() {
            let line = line.to_string();
            self.replace_input(line);
        }
        KeyDisposition::Handled
    }

    fn replace_input(&mut self, value: String) {
        self.input = value.clone();
        self.outbox.push(OverlayMessage::InputChanged { value });
        self.outbox.push(OverlayMessage::CaretToEnd);
    }

    // =========================================================================
    // Completion
    // =========================================================================

    /// Complete the input line against the command keywords
    ///
    /// A single match replaces the input; several are listed as a dim hint.
    pub fn complete(&mut self) -> KeyDisposition {
        let prefix = self.input.trim().to_lowercase();
        if prefix.is_empty() {
            return KeyDisposition::Handled;
        }

        match Command::completions(&prefix).as_slice() {
            [] => {}
            [only] => self.replace_input((*only).to_string()),
            several => self.append_line(several.join("  "), LineStyle::Dim),
        }

        KeyDisposition::Handled
    }

    // =========================================================================
    // Visibility & Focus
    // =========================================================================

    /// Reopen the terminal from the "return" control
    ///
    /// Scrollback and history are left as they were.
    pub fn return_to_terminal(&mut self) {
        self.set_visibility(Visibility::Shown);
        self.set_return_control(false);
        self.outbox.push(OverlayMessage::FocusInput);
    }

    /// A click anywhere focuses the input line
    pub fn click(&mut self) {
        self.outbox.push(OverlayMessage::FocusInput);
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.outbox.push(OverlayMessage::OverlayVisibility {
            visible: visibility == Visibility::Shown,
        });
    }

    fn set_return_control(&mut self, visible: bool) {
        self.return_control_visible = visible;
        self.outbox.push(OverlayMessage::ReturnControl { visible });
    }

    // =========================================================================
    // Input Editing
    // =========================================================================

    /// Replace the input line with the host's value
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Type one character at the end of the input line
    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
        self.outbox.push(OverlayMessage::InputChanged {
            value: self.input.clone(),
        });
    }

    /// Delete the last character of the input line
    pub fn backspace(&mut self) {
        if self.input.pop().is_some() {
            self.outbox.push(OverlayMessage::InputChanged {
                value: self.input.clone(),
            });
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn append_line(&mut self, text: impl Into<String>, style: LineStyle) {
        let row = self.scrollback.append_line(text, style).clone();
        self.publish(row);
    }

    fn append_block(&mut self, text: impl Into<String>) {
        let row = self.scrollback.append_block(text).clone();
        self.publish(row);
    }

    fn echo_prompt(&mut self, raw_input: &str) {
        let row = self.scrollback.echo_prompt(&self.prompt, raw_input).clone();
        self.publish(row);
    }

    fn publish(&mut self, row: Row) {
        self.outbox.push(OverlayMessage::RowAppended(row));
        self.outbox.push(OverlayMessage::ScrollToLatest);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Take every pending message, oldest first
    pub fn drain_messages(&mut self) -> Vec<OverlayMessage> {
        std::mem::take(&mut self.outbox)
    }

    /// The scrollback
    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    /// The input history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The line being edited
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current overlay state
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the overlay is shown
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    /// Whether the "return to terminal" control is shown
    pub fn return_control_visible(&self) -> bool {
        self.return_control_visible
    }

    /// The prompt used for echoes
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// The page content is read from
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Swap in freshly loaded page content
    ///
    /// Later commands read the new content; existing rows are untouched.
    pub fn replace_page(&mut self, page: P) {
        self.page = page;
    }
}
