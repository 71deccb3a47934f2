//! Overlay Messages
//!
//! Effects the controller asks a host surface to apply. Surfaces are pure
//! renderers: they mirror scrollback and visibility from these messages and
//! never read controller internals.

use serde::{Deserialize, Serialize};

use crate::scrollback::Row;

/// Messages from the controller to a host surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayMessage {
    // ============================================
    // Scrollback
    // ============================================
    /// A row was appended to the scrollback
    RowAppended(Row),

    /// The scrollback was emptied
    Cleared,

    /// Keep the newest row in view
    ScrollToLatest,

    // ============================================
    // Visibility
    // ============================================
    /// Show or hide the overlay
    OverlayVisibility {
        /// Whether the overlay is shown
        visible: bool,
    },

    /// Show or hide the "return to terminal" control
    ReturnControl {
        /// Whether the control is shown
        visible: bool,
    },

    // ============================================
    // Input Line
    // ============================================
    /// The input line now holds this value
    InputChanged {
        /// New input value
        value: String,
    },

    /// Move the caret to the end of the input line once the value is applied
    CaretToEnd,

    /// Give the input line keyboard focus
    FocusInput,
}

