//! Page Content
//!
//! The read side of the overlay: the regions of the surrounding portfolio
//! page that content commands describe.
//!
//! # Design Philosophy
//!
//! The controller never reaches into global page state. Everything it reads
//! goes through [`PageContent`], so a host can back it with a live document,
//! a TOML page file, or a fake in tests.
//!
//! Content is read on demand every time a command runs. Nothing is cached.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading a page file
#[derive(Debug, Error)]
pub enum PageError {
    /// Failed to read page file
    #[error("Failed to read page file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse page file: {0}")]
    ParseError(#[from] toml::de::Error),
}

// =============================================================================
// Read Capability
// =============================================================================

/// A project card from the personal projects section
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectCard {
    /// First heading of the card, if it has one
    pub title: Option<String>,
    /// Paragraph texts in document order
    pub paragraphs: Vec<String>,
}

impl ProjectCard {
    /// Create a card with a title and paragraphs
    pub fn new(title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            title: Some(title.into()),
            paragraphs,
        }
    }
}

/// A link from the contact icon bar
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactLink {
    /// Link target as written in the page
    pub href: String,
    /// Alternative text of the link's icon, if any
    pub icon_alt: Option<String>,
}

impl ContactLink {
    /// Create a link without an icon
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            icon_alt: None,
        }
    }

    /// Attach icon alternative text
    #[must_use]
    pub fn with_icon_alt(mut self, alt: impl Into<String>) -> Self {
        self.icon_alt = Some(alt.into());
        self
    }
}

/// Read access to the page the overlay sits on
pub trait PageContent {
    /// Whether the page hosts the overlay at all
    fn has_overlay_root(&self) -> bool;

    /// Visible text of the first region matching `selector`
    fn region_text(&self, selector: &str) -> Option<String>;

    /// All project cards, in page order
    fn project_cards(&self) -> Vec<ProjectCard>;

    /// All contact links, in page order
    fn contact_links(&self) -> Vec<ContactLink>;
}

impl<P: PageContent + ?Sized> PageContent for &P {
    fn has_overlay_root(&self) -> bool {
        (**self).has_overlay_root()
    }

    fn region_text(&self, selector: &str) -> Option<String> {
        (**self).region_text(selector)
    }

    fn project_cards(&self) -> Vec<ProjectCard> {
        (**self).project_cards()
    }

    fn contact_links(&self) -> Vec<ContactLink> {
        (**self).contact_links()
    }
}

// =============================================================================
// TOML-backed Page
// =============================================================================

/// Marker table for the overlay root
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalRoot {}

/// A portfolio page loaded from a TOML page file
///
/// ```toml
/// [terminal]
///
/// [sections]
/// about = "I build things."
///
/// [[projects]]
/// title = "Tracker"
/// paragraphs = ["A tiny tracker."]
///
/// [[contacts]]
/// href = "https://github.com/someone"
/// icon_alt = "GitHub"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioPage {
    /// Present when the page mounts the terminal overlay
    pub terminal: Option<TerminalRoot>,
    /// Region text keyed by element id
    pub sections: BTreeMap<String, String>,
    /// Cards under the personal projects section
    pub projects: Vec<ProjectCard>,
    /// Links in the contact icon bar
    pub contacts: Vec<ContactLink>,
}

impl PortfolioPage {
    /// An empty page that mounts the overlay
    #[must_use]
    pub fn with_terminal() -> Self {
        Self {
            terminal: Some(TerminalRoot {}),
            ..Self::default()
        }
    }

    /// Set the text of the region with element id `id`
    #[must_use]
    pub fn with_section(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.sections.insert(id.into(), text.into());
        self
    }

    /// Append a project card
    #[must_use]
    pub fn with_project(mut self, card: ProjectCard) -> Self {
        self.projects.push(card);
        self
    }

    /// Append a contact link
    #[must_use]
    pub fn with_contact(mut self, link: ContactLink) -> Self {
        self.contacts.push(link);
        self
    }

    /// Parse a page from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ParseError`] if the text is not a valid page.
    pub fn from_toml_str(content: &str) -> Result<Self, PageError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a page file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let content = std::fs::read_to_string(path).map_err(|e| PageError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let page = Self::from_toml_str(&content)?;

        tracing::info!(
            path = %path.display(),
            sections = page.sections.len(),
            projects = page.projects.len(),
            contacts = page.contacts.len(),
            "Loaded page"
        );

        Ok(page)
    }
}

impl PageContent for PortfolioPage {
    fn has_overlay_root(&self) -> bool {
        self.terminal.is_some()
    }

    fn region_text(&self, selector: &str) -> Option<String> {
        // Only id selectors address regions; ids are case-sensitive
        let id = selector.strip_prefix('#')?;
        self.sections.get(id).cloned()
    }

    fn project_cards(&self) -> Vec<ProjectCard> {
        self.projects.clone()
    }

    fn contact_links(&self) -> Vec<ContactLink> {
        self.contacts.clone()
    }
}
