//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::PathBuf;

use debcl::document::Document;
use debcl::identity::Identity;

/// Fixed trailer date used across tests.
pub const DATE: &str = "Fri, 05 Jan 2024 08:30:00 +0000";

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a changelog fixture.
pub fn changelog_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("changelogs").join(name)
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Load a changelog fixture as a document.
pub fn fixture_document(name: &str) -> Document {
    Document::from_text(&read_fixture(changelog_fixture(name)))
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// The identity used in trailer assertions.
pub fn test_identity() -> Identity {
    Identity::new("A B", "a@b.com")
}
