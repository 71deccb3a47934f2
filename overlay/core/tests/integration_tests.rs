//! Integration tests for the terminal overlay
//!
//! These tests drive the controller the way a host would: boot it on a page,
//! feed it events, and read back the scrollback and outbound messages.
//! Tests cover:
//! - Command dispatch against a counting fake page
//! - Unknown and blank input
//! - The enter / return round trip
//! - Completion and history recall at the boundaries
//! - Configuration and page files feeding the controller

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use overlay_core::commands::{ENTER_CONFIRMATION, UNKNOWN_COMMAND_HINT};
use overlay_core::{
    help_text, load_config_from_path, Command, ContactLink, KeyDisposition, LineStyle,
    OverlayEvent, OverlayMessage, PageContent, PortfolioPage, ProjectCard, Row, TerminalConfig,
    TerminalController, Visibility,
};

// =============================================================================
// Counting Fake Page
// =============================================================================

/// A page that records every read so tests can count command executions
#[derive(Default)]
struct CountingPage {
    reads: RefCell<HashMap<String, usize>>,
}

impl CountingPage {
    fn record(&self, what: &str) {
        *self.reads.borrow_mut().entry(what.to_string()).or_default() += 1;
    }

    fn reads(&self) -> HashMap<String, usize> {
        self.reads.borrow().clone()
    }
}

impl PageContent for CountingPage {
    fn has_overlay_root(&self) -> bool {
        true
    }

    fn region_text(&self, selector: &str) -> Option<String> {
        self.record(selector);
        Some(format!("text of {selector}"))
    }

    fn project_cards(&self) -> Vec<ProjectCard> {
        self.record("projects");
        vec![ProjectCard::new("One", vec!["First".to_string()])]
    }

    fn contact_links(&self) -> Vec<ContactLink> {
        self.record("contacts");
        vec![ContactLink::new("https://example.com/me")]
    }
}

fn boot_counting() -> TerminalController<CountingPage> {
    let mut controller =
        TerminalController::boot(CountingPage::default(), &TerminalConfig::default())
            .expect("counting page has a root");
    controller.drain_messages();
    controller
}

fn sample_page() -> PortfolioPage {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("pages/portfolio.toml");
    PortfolioPage::load(&path).expect("sample page parses")
}

// =============================================================================
// Test 1: Every keyword runs exactly once
// =============================================================================

#[test]
fn test_each_keyword_reads_its_source_once() {
    let cases = [
        ("AboutMe extra tokens", "#about"),
        ("PROJECTS", "projects"),
        ("awards   now", "#Awards"),
        ("Education", "#education"),
        ("cOnTaCt me", "contacts"),
    ];

    for (input, source) in cases {
        let mut controller = boot_counting();
        controller.submit_line(input);

        let reads = controller.page().reads();
        assert_eq!(reads.len(), 1, "{input} read {reads:?}");
        assert_eq!(reads.get(source), Some(&1), "{input} read {reads:?}");

        // Echo plus exactly one output block
        let rows = controller.scrollback().rows();
        assert_eq!(rows.len(), 3, "{input}");
        assert!(rows[2].is_block());
    }
}

#[test]
fn test_help_enter_clear_touch_no_content() {
    for input in ["HELP me", "Enter now", "CLEAR all"] {
        let mut controller = boot_counting();
        controller.submit_line(input);
        assert!(controller.page().reads().is_empty(), "{input}");
    }
}

// =============================================================================
// Test 2: Unknown and blank input
// =============================================================================

#[test]
fn test_unknown_input_yields_error_and_hint() {
    for input in ["foo", "HELPME", "about", "ls -la", "exit now"] {
        let mut controller = boot_counting();
        controller.submit_line(input);

        let rows = controller.scrollback().rows();
        let name = input.split_whitespace().next().unwrap().to_lowercase();
        assert_eq!(rows.len(), 4, "{input}");
        assert_eq!(
            rows[2],
            Row::Line {
                text: format!("command not found: {name}"),
                style: LineStyle::Error,
            }
        );
        assert_eq!(
            rows[3],
            Row::Line {
                text: UNKNOWN_COMMAND_HINT.to_string(),
                style: LineStyle::Dim,
            }
        );
        assert!(controller.page().reads().is_empty());
        assert_eq!(controller.visibility(), Visibility::Shown);
    }
}

#[test]
fn test_blank_input_echoes_and_records() {
    let mut controller = boot_counting();
    controller.submit_line("");
    controller.submit_line(" \t ");

    let rows = controller.scrollback().rows();
    assert_eq!(rows.len(), 3);
    assert!(matches!(rows[1], Row::Echo { .. }));
    assert!(matches!(rows[2], Row::Echo { .. }));
    assert_eq!(controller.history().entries(), ["", " \t "]);
    assert_eq!(controller.history().cursor(), 2);
}

#[test]
fn test_markup_in_input_is_escaped() {
    let mut controller = boot_counting();
    controller.submit_line("<script>alert('x')</script>");

    let echo = &controller.scrollback().rows()[1];
    assert_eq!(
        echo.text(),
        "guest@ali-site:~$ &lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"
    );
    assert!(!echo.to_html().contains("<script>"));

    // Plain rows keep their text and are escaped only when rendered as HTML
    let error = &controller.scrollback().rows()[2];
    assert_eq!(
        error.text(),
        "command not found: <script>alert('x')</script>"
    );
    assert!(!error.to_html().contains("<script>"));
}

// =============================================================================
// Test 3: Clear and help
// =============================================================================

#[test]
fn test_clear_then_help_is_one_block() {
    let mut controller = TerminalController::boot(sample_page(), &TerminalConfig::default())
        .expect("sample page has a root");

    controller.submit_line("projects");
    controller.submit_line("contact");
    controller.submit_line("clear");
    assert!(controller.scrollback().is_empty());

    controller.submit_line("help");
    let blocks: Vec<_> = controller
        .scrollback()
        .rows()
        .iter()
        .filter(|row| row.is_block())
        .collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text(), help_text());
}

// =============================================================================
// Test 4: Enter and return
// =============================================================================

#[test]
fn test_enter_then_return_scenario() {
    let mut controller = boot_counting();

    controller.handle_event(OverlayEvent::Input("enter".to_string()));
    controller.handle_event(OverlayEvent::Submit);

    assert_eq!(controller.visibility(), Visibility::Hidden);
    assert!(controller.return_control_visible());

    let messages = controller.drain_messages();
    assert!(messages.contains(&OverlayMessage::OverlayVisibility { visible: false }));
    assert!(messages.contains(&OverlayMessage::ReturnControl { visible: true }));
    let confirmations = messages
        .iter()
        .filter(|m| {
            matches!(m, OverlayMessage::RowAppended(Row::Line { text, .. }) if text == ENTER_CONFIRMATION)
        })
        .count();
    assert_eq!(confirmations, 1);

    let rows_before: Vec<Row> = controller.scrollback().rows().to_vec();
    let history_before: Vec<String> = controller.history().entries().to_vec();

    controller.handle_event(OverlayEvent::Return);

    assert_eq!(controller.visibility(), Visibility::Shown);
    assert!(!controller.return_control_visible());
    assert_eq!(controller.scrollback().rows(), rows_before.as_slice());
    assert_eq!(controller.history().entries(), history_before.as_slice());
    assert_eq!(
        controller.scrollback().last().map(Row::text),
        Some(ENTER_CONFIRMATION.to_string())
    );
    assert!(controller
        .drain_messages()
        .contains(&OverlayMessage::FocusInput));
}

// =============================================================================
// Test 5: Completion
// =============================================================================

#[test]
fn test_completion_properties() {
    let mut controller = boot_counting();

    controller.set_input("ed");
    assert_eq!(
        controller.handle_event(OverlayEvent::Complete),
        KeyDisposition::Handled
    );
    assert_eq!(controller.input(), "education");

    controller.set_input("a");
    controller.handle_event(OverlayEvent::Complete);
    assert_eq!(controller.input(), "a");
    assert_eq!(
        controller.scrollback().last().map(Row::text),
        Some("aboutme  awards".to_string())
    );

    // "e" is shared by education and enter
    controller.set_input("e");
    controller.handle_event(OverlayEvent::Complete);
    assert_eq!(controller.input(), "e");
    assert_eq!(
        controller.scrollback().last().map(Row::text),
        Some("education  enter".to_string())
    );
}

#[test]
fn test_every_keyword_completes_from_full_name() {
    for command in Command::ALL {
        let mut controller = boot_counting();
        controller.set_input(command.name().to_uppercase());
        controller.complete();
        assert_eq!(controller.input(), command.name());
    }
}

// =============================================================================
// Test 6: History recall boundaries
// =============================================================================

#[test]
fn test_recall_is_idempotent_at_boundaries() {
    let mut controller = boot_counting();
    for line in ["help", "awards", "contact"] {
        controller.submit_line(line);
    }

    for _ in 0..3 {
        controller.handle_event(OverlayEvent::RecallPrevious);
    }
    assert_eq!(controller.input(), "help");
    for _ in 0..4 {
        assert!(controller
            .handle_event(OverlayEvent::RecallPrevious)
            .suppress_default());
        assert_eq!(controller.input(), "help");
        assert_eq!(controller.history().cursor(), 0);
    }

    for _ in 0..3 {
        controller.handle_event(OverlayEvent::RecallNext);
    }
    assert_eq!(controller.input(), "");
    for _ in 0..4 {
        assert!(controller
            .handle_event(OverlayEvent::RecallNext)
            .suppress_default());
        assert_eq!(controller.input(), "");
        assert_eq!(controller.history().cursor(), 3);
    }
}

// =============================================================================
// Test 7: Files feeding the controller
// =============================================================================

#[test]
fn test_sample_page_commands() {
    let mut controller = TerminalController::boot(sample_page(), &TerminalConfig::default())
        .expect("sample page has a root");

    controller.submit_line("aboutme");
    let about = controller.scrollback().last().map(Row::text).unwrap();
    assert!(about.starts_with("Hi, I'm Ali."));
    assert!(!about.contains("\n\n\n"));

    controller.submit_line("contact");
    assert_eq!(
        controller.scrollback().last().map(Row::text).unwrap(),
        "- Email: mailto:ali@example.com\n\
         - GitHub: https://github.com/ali-example\n\
         - www.linkedin.com: https://www.linkedin.com/in/ali-example"
    );

    controller.submit_line("projects");
    assert!(controller
        .scrollback()
        .last()
        .map(Row::text)
        .unwrap()
        .starts_with("• Pattern Tracker\nA keyboard-driven music tracker.\n"));
}

#[test]
fn test_config_file_sets_prompt_and_banner() {
    let toml_content = r#"
[prompt]
user = "visitor"
host = "portfolio"

[banner]
lines = ["hello there"]
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(toml_content.as_bytes()).unwrap();
    let mut config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();
    // Env vars from parallel config tests must not leak into the prompt
    config.prompt.user = "visitor".to_string();
    config.prompt.host = "portfolio".to_string();

    let mut controller =
        TerminalController::boot(PortfolioPage::with_terminal(), &config).unwrap();
    assert_eq!(controller.scrollback().rows()[0].text(), "hello there");

    controller.submit_line("help");
    assert_eq!(
        controller.scrollback().rows()[1].text(),
        "visitor@portfolio:~$ help"
    );
}
