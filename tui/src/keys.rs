//! Key Bindings
//!
//! Translates crossterm key events into controller events or TUI-local
//! actions. Which keys mean what depends on whether the overlay is covering
//! the page.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use overlay_core::OverlayEvent;

/// Lines scrolled by PageUp/PageDown
pub const PAGE_STEP: i32 = 10;

/// What a key press asks the app to do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward an event to the controller
    Overlay(OverlayEvent),
    /// Type a character into the input line
    InsertChar(char),
    /// Delete the character before the caret
    Backspace,
    /// Scroll the visible view (positive = down)
    Scroll(i32),
    /// Reload the page file
    Reload,
    /// Leave the app
    Quit,
    /// Nothing bound
    None,
}

/// Map a key event given the current overlay visibility
pub fn map_key(key: KeyEvent, overlay_visible: bool) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::PageUp => return KeyAction::Scroll(-PAGE_STEP),
        KeyCode::PageDown => return KeyAction::Scroll(PAGE_STEP),
        _ => {}
    }

    if overlay_visible {
        match key.code {
            KeyCode::Enter => KeyAction::Overlay(OverlayEvent::Submit),
            KeyCode::Up => KeyAction::Overlay(OverlayEvent::RecallPrevious),
            KeyCode::Down => KeyAction::Overlay(OverlayEvent::RecallNext),
            KeyCode::Tab => KeyAction::Overlay(OverlayEvent::Complete),
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                KeyAction::InsertChar(c)
            }
            _ => KeyAction::None,
        }
    } else {
        match key.code {
            KeyCode::Esc | KeyCode::Char('t') => KeyAction::Overlay(OverlayEvent::Return),
            KeyCode::Up => KeyAction::Scroll(-1),
            KeyCode::Down => KeyAction::Scroll(1),
            KeyCode::F(5) => KeyAction::Reload,
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}
