//! Shared test helpers for integration tests.

pub use test_helpers::{RecordingReporter, Sandbox};

/// Returns the path of a file in the `tests/fixtures/` directory.
pub fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{name}")
}

/// Loads a fixture file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}
