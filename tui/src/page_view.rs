//! Page View
//!
//! The portfolio page as it sits under the overlay: one heading per section
//! followed by its text. The same extractors that back the commands produce
//! the section bodies, so what `aboutme` prints is what the page shows.

use overlay_core::extract::{extract_contacts, extract_projects, extract_section, NOT_FOUND};
use overlay_core::PageContent;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::theme::{PAGE_HEADING, PAGE_TEXT};

/// Section headings and the regions they show
const REGIONS: [(&str, &str); 3] = [
    ("About", "#about"),
    ("Awards", "#Awards"),
    ("Education", "#education"),
];

/// A rendered page section
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSection {
    /// Heading shown above the body
    pub heading: &'static str,
    /// Body text
    pub body: String,
}

/// Collect the sections the page actually has
///
/// Missing regions are left out rather than shown with a fallback.
pub fn page_sections<P: PageContent + ?Sized>(page: &P) -> Vec<PageSection> {
    let mut sections = Vec::new();

    let (about_heading, about_selector) = REGIONS[0];
    sections.extend(region_section(page, about_heading, about_selector));

    if !page.project_cards().is_empty() {
        sections.push(PageSection {
            heading: "Projects",
            body: extract_projects(page),
        });
    }

    for &(heading, selector) in &REGIONS[1..] {
        sections.extend(region_section(page, heading, selector));
    }

    if !page.contact_links().is_empty() {
        sections.push(PageSection {
            heading: "Contact",
            body: extract_contacts(page),
        });
    }

    sections
}

fn region_section<P: PageContent + ?Sized>(
    page: &P,
    heading: &'static str,
    selector: &str,
) -> Option<PageSection> {
    page.region_text(selector)?;
    Some(PageSection {
        heading,
        body: extract_section(page, selector, NOT_FOUND),
    })
}

/// Styled lines for the page view
pub fn page_lines<P: PageContent + ?Sized>(page: &P) -> Vec<Line<'static>> {
    let heading_style = Style::default()
        .fg(PAGE_HEADING)
        .add_modifier(Modifier::BOLD);
    let body_style = Style::default().fg(PAGE_TEXT);

    let mut lines = Vec::new();
    for section in page_sections(page) {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            section.heading.to_uppercase(),
            heading_style,
        )));
        lines.extend(
            section
                .body
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), body_style))),
        );
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "This page is empty.".to_string(),
            body_style,
        )));
    }
    lines
}
