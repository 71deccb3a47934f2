//! Overlay Events
//!
//! Input events a host forwards to the controller. Hosts translate their
//! native events (DOM key events, crossterm key presses, test scripts) into
//! these and never interpret them further.

use serde::{Deserialize, Serialize};

/// Events from a host surface to the controller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayEvent {
    // ============================================
    // Prompt Events
    // ============================================
    /// The current input line was submitted
    Submit,

    /// The host's text box changed to this value
    Input(String),

    // ============================================
    // Navigation Events
    // ============================================
    /// Upward navigation key
    RecallPrevious,

    /// Downward navigation key
    RecallNext,

    /// Completion key
    Complete,

    // ============================================
    // Affordance Events
    // ============================================
    /// The "return to terminal" control was activated
    Return,

    /// A click anywhere on the page
    Click,
}

/// Whether the host should still apply a key's default effect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The controller consumed the key; suppress the default effect
    Handled,
    /// The host should apply its default behavior
    PassThrough,
}

impl KeyDisposition {
    /// Whether the default effect must be suppressed
    #[must_use]
    pub fn suppress_default(self) -> bool {
        matches!(self, KeyDisposition::Handled)
    }
}
