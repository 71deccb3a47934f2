//! Portfolio TUI - Terminal host for the portfolio overlay
//!
//! This crate renders the portfolio page full-screen with the terminal
//! overlay composited on top of it. All command handling lives in
//! `overlay-core`; this crate only translates terminal events and draws.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering; the overlay is a solid layer over the page
//! - **Display**: Mirror of the controller's scrollback and visibility
//! - **Keys**: Key bindings for the overlay and the page view
//! - **Widgets**: Borderless scrollable text blocks
//! - **Headless**: Non-interactive `--exec` mode

pub mod app;
pub mod compositor;
pub mod display;
pub mod headless;
pub mod keys;
pub mod page_view;
pub mod theme;
pub mod widgets;

pub use app::App;
