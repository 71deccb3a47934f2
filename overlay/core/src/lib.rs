//! Overlay Core - Headless Terminal Overlay for the Portfolio Page
//!
//! This crate provides the terminal overlay that sits on top of the
//! portfolio page, completely independent of any UI framework. It can be
//! hosted by a TUI, a web page, or run headless in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Host Surfaces                        │
//! │   ┌─────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │   │   TUI   │   │   Web page   │   │ Headless / tests │  │
//! │   └────┬────┘   └──────┬───────┘   └────────┬─────────┘  │
//! │        └───────────────┴────────────────────┘            │
//! │                 OverlayEvent (in)                         │
//! │                 OverlayMessage (out)                      │
//! └────────────────────────┬─────────────────────────────────┘
//!                          │
//! ┌────────────────────────┴─────────────────────────────────┐
//! │                  TerminalController                       │
//! │  ┌──────────┐ ┌─────────┐ ┌──────────┐ ┌──────────────┐  │
//! │  │ Commands │ │ History │ │Scrollback│ │ PageContent  │  │
//! │  └──────────┘ └─────────┘ └──────────┘ └──────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`commands`]: The fixed keyword table and completion
//! - [`config`]: TOML configuration with env and CLI overrides
//! - [`controller`]: The [`TerminalController`] state machine
//! - [`events`]: Events from host surfaces
//! - [`extract`]: Page regions to display text
//! - [`history`]: Input history with a recall cursor
//! - [`messages`]: Effects for host surfaces to apply
//! - [`page`]: The [`PageContent`] read capability and TOML pages
//! - [`scrollback`]: Rows, styles, and markup escaping
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod controller;
pub mod events;
pub mod extract;
pub mod history;
pub mod messages;
pub mod page;
pub mod scrollback;

// Re-exports for convenience
pub use commands::{help_text, Command, CommandOutcome};
pub use controller::{TerminalController, Visibility};
pub use events::{KeyDisposition, OverlayEvent};
pub use history::History;
pub use messages::OverlayMessage;
pub use page::{ContactLink, PageContent, PageError, PortfolioPage, ProjectCard};
pub use scrollback::{escape_html, LineStyle, Prompt, Row, Scrollback};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, TerminalConfig, TerminalToml,
};
