//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The overlay core stays free of UI frameworks
//! - No sleep() calls in production code
//! - No unwrap()/expect() in production code
//!
//! Helpers shared by the tests live here.

use std::fs;
use std::path::{Path, PathBuf};

/// Root of the workspace
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Production source files under `dir`, relative to the workspace root
///
/// Each entry pairs the path with the file's lines up to its
/// `#[cfg(test)]` module, if any.
pub fn production_sources(dir: &str) -> Vec<(PathBuf, Vec<String>)> {
    let root = workspace_root().join(dir);
    if !root.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter_map(|e| {
            let content = fs::read_to_string(e.path()).ok()?;
            let lines = content
                .lines()
                .take_while(|l| l.trim() != "#[cfg(test)]")
                .map(str::to_string)
                .collect();
            Some((e.path().to_path_buf(), lines))
        })
        .collect()
}

/// Code part of a line, with any trailing `//` comment removed
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}
