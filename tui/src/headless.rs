//! Headless Mode
//!
//! Runs a fixed list of command lines through the controller without a
//! terminal and returns the scrollback as plain text. Used by `--exec`.

use overlay_core::{PageContent, TerminalConfig, TerminalController};

use crate::display::DisplayState;

/// Submit each line in order and return the resulting transcript
///
/// Returns `None` when the page does not mount the overlay.
pub fn run_lines<P, I, S>(page: P, config: &TerminalConfig, lines: I) -> Option<String>
where
    P: PageContent,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut controller = TerminalController::boot(page, config)?;
    let mut display = DisplayState::new();
    display.apply_all(controller.drain_messages());

    for line in lines {
        let line = line.into();
        tracing::debug!(line = %line, "Headless submit");
        controller.submit_line(line);
        display.apply_all(controller.drain_messages());
    }

    Some(display.transcript())
}
