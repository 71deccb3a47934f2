//! Content Extraction
//!
//! Turns page regions into plain display text for the content commands.
//! Absence is never an error: every extractor degrades to a fixed
//! placeholder string.

use url::Url;

use crate::page::{ContactLink, PageContent, ProjectCard};

/// Fallback for a region that does not exist
pub const NOT_FOUND: &str = "Not found.";

/// Output when the page has no project cards
pub const NO_PROJECTS: &str = "No projects listed.";

/// Output when the page has no contact links
pub const NO_CONTACTS: &str = "No contact links found.";

/// Title used for a card without a heading
pub const UNTITLED: &str = "Untitled";

/// Text of the region matching `selector`, or `fallback`
///
/// Runs of three or more newlines collapse to a single blank line and the
/// result is trimmed.
pub fn extract_section<P: PageContent + ?Sized>(page: &P, selector: &str, fallback: &str) -> String {
    match page.region_text(selector) {
        Some(text) => collapse_blank_lines(&text).trim().to_string(),
        None => {
            tracing::debug!(selector, "Region not found, using fallback");
            fallback.to_string()
        }
    }
}

/// Bulleted listing of every project card
pub fn extract_projects<P: PageContent + ?Sized>(page: &P) -> String {
    let cards = page.project_cards();
    if cards.is_empty() {
        return NO_PROJECTS.to_string();
    }

    cards
        .iter()
        .map(project_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One `- Label: href` line per contact link
pub fn extract_contacts<P: PageContent + ?Sized>(page: &P) -> String {
    let links = page.contact_links();
    if links.is_empty() {
        return NO_CONTACTS.to_string();
    }

    links
        .iter()
        .map(|link| format!("- {}: {}", contact_label(link), link.href))
        .collect::<Vec<_>>()
        .join("\n")
}

fn project_entry(card: &ProjectCard) -> String {
    let title = card.title.as_deref().unwrap_or(UNTITLED).trim();
    let description = card
        .paragraphs
        .iter()
        .map(|p| p.trim())
        .collect::<Vec<_>>()
        .join("\n");
    format!("• {title}\n{description}")
}

/// Label for a contact link
///
/// `mailto:` targets are always "Email". Otherwise the icon's alt text wins,
/// then the link's host, then the literal "Link". Empty values fall through.
pub fn contact_label(link: &ContactLink) -> String {
    if link.href.starts_with("mailto:") {
        return "Email".to_string();
    }

    if let Some(alt) = link.icon_alt.as_deref().filter(|alt| !alt.is_empty()) {
        return alt.to_string();
    }

    Url::parse(&link.href)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| "Link".to_string())
}

/// Collapse every run of 3+ newlines to exactly two
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run <= 2 {
                out.push(ch);
            }
        } else {
            run = 0;
            out.push(ch);
        }
    }

    out
}
