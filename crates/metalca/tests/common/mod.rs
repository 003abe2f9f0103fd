//! Shared test utilities for metalca integration tests.
//!
//! Builder patterns for creating projects and stages programmatically, plus
//! helpers for writing reference data files into temp directories.

pub mod builders;

pub use builders::*;

#[allow(dead_code)]
pub fn write_temp_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    path
}
