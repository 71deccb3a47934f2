//! Integration Test: Production Code Hygiene
//!
//! **Policy**: Production code never sleeps and never panics on a fallible
//! value. Timers use `tokio::time::interval`; errors propagate with `?`.
//! Test modules (`#[cfg(test)]`) and `tests/` directories are exempt.

use architectural_enforcement::{code_part, production_sources};

const PRODUCTION_DIRS: &[&str] = &["overlay/core/src", "tui/src"];

fn find_violations(matches: impl Fn(&str) -> bool) -> Vec<String> {
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for (path, lines) in production_sources(dir) {
            for (idx, line) in lines.iter().enumerate() {
                let code = code_part(line);
                // Doc examples are not production code
                if line.trim_start().starts_with("//") {
                    continue;
                }
                if matches(code) {
                    violations.push(format!("{}:{} - {}", path.display(), idx + 1, line.trim()));
                }
            }
        }
    }

    violations
}

#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_violations(|code| code.contains("::sleep(") || code.contains(".sleep("));

    assert!(
        violations.is_empty(),
        "Found {} sleep call(s) in production code:\n{}",
        violations.len(),
        violations.join("\n")
    );
}

#[test]
fn test_no_unwrap_or_expect_in_production_code() {
    let violations =
        find_violations(|code| code.contains(".unwrap()") || code.contains(".expect("));

    assert!(
        violations.is_empty(),
        "Found {} unwrap()/expect() call(s) in production code:\n{}",
        violations.len(),
        violations.join("\n")
    );
}

#[test]
fn test_production_sources_are_found() {
    for dir in PRODUCTION_DIRS {
        assert!(
            !production_sources(dir).is_empty(),
            "no sources found under {dir}"
        );
    }
}
