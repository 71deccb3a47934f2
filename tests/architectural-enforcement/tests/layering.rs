//! Integration Test: Layering
//!
//! The overlay core must build and run without any terminal or UI stack, so
//! every host (TUI, web, tests) can embed it.

use std::fs;

use architectural_enforcement::{code_part, production_sources, workspace_root};

const UI_CRATES: &[&str] = &["ratatui", "crossterm", "tokio"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("overlay/core/Cargo.toml"))
        .expect("core manifest is readable");

    let violations: Vec<_> = UI_CRATES
        .iter()
        .filter(|name| {
            manifest
                .lines()
                .any(|line| line.trim_start().starts_with(&format!("{name} ")))
        })
        .collect();

    assert!(
        violations.is_empty(),
        "overlay-core depends on UI crates: {violations:?}"
    );
}

#[test]
fn test_core_sources_do_not_use_ui_crates() {
    let mut violations = Vec::new();

    for (path, lines) in production_sources("overlay/core/src") {
        for (idx, line) in lines.iter().enumerate() {
            let code = code_part(line);
            if UI_CRATES
                .iter()
                .any(|name| code.contains(&format!("{name}::")))
            {
                violations.push(format!("{}:{} - {}", path.display(), idx + 1, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "overlay-core references UI crates:\n{}",
        violations.join("\n")
    );
}
