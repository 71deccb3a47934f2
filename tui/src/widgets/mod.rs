//! Custom Widgets
//!
//! Borderless widgets shared by the page view and the overlay.

mod text_block;

pub use text_block::{wrap_line, TextBlock, TextBlockState};
