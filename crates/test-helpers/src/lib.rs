//! Shared helpers for `approvals` integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use approvals::{Namer, Reporter, TestIdentity, Verifier};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary approval directory for one test identity.
#[derive(Debug)]
pub struct Sandbox {
    _temp: TempDir,
    root: Utf8PathBuf,
    identity: TestIdentity,
}

impl Sandbox {
    /// Creates an empty sandbox for `identity`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created, is not UTF-8,
    /// or `identity` is invalid.
    #[must_use]
    pub fn new(identity: &str) -> Self {
        let temp = TempDir::new().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temp dir is not UTF-8: {}", path.display()));
        let parsed = TestIdentity::new(identity)
            .unwrap_or_else(|e| panic!("invalid sandbox identity {identity}: {e}"));
        Self {
            _temp: temp,
            root,
            identity: parsed,
        }
    }

    /// Returns the sandbox directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns a namer for the sandbox identity.
    #[must_use]
    pub fn namer(&self) -> Namer {
        Namer::new(self.root.clone(), self.identity.clone())
    }

    /// Returns a verifier that reports through `reporter`.
    #[must_use]
    pub fn verifier(&self, reporter: &RecordingReporter) -> Verifier {
        Verifier::new(self.namer()).with_reporter(reporter.clone())
    }

    /// Returns the approved `.txt` file path.
    #[must_use]
    pub fn approved_path(&self) -> Utf8PathBuf {
        self.namer().unit(".txt").approved_path()
    }

    /// Returns the received `.txt` file path.
    #[must_use]
    pub fn received_path(&self) -> Utf8PathBuf {
        self.namer().unit(".txt").received_path()
    }

    /// Writes the approved file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn approve(&self, contents: &str) {
        let path = self.approved_path();
        std::fs::write(&path, contents).unwrap_or_else(|e| panic!("failed to write {path}: {e}"));
    }

    /// Copies the received file over the approved file.
    ///
    /// # Panics
    ///
    /// Panics if there is no received file to promote.
    pub fn promote_received(&self) {
        let (from, to) = (self.received_path(), self.approved_path());
        std::fs::copy(&from, &to).unwrap_or_else(|e| panic!("failed to promote {from}: {e}"));
    }

    /// Returns the received file's contents, or `None` if it does not exist.
    #[must_use]
    pub fn received(&self) -> Option<String> {
        std::fs::read_to_string(self.received_path()).ok()
    }

    /// Returns the approved file's contents, or `None` if it does not exist.
    #[must_use]
    pub fn approved(&self) -> Option<String> {
        std::fs::read_to_string(self.approved_path()).ok()
    }
}

/// One recorded reporter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Received file path passed to the reporter.
    pub received: Utf8PathBuf,
    /// Approved file path passed to the reporter.
    pub approved: Utf8PathBuf,
    /// Received file contents at the moment of the report.
    pub received_contents: Option<String>,
}

/// A reporter that records every call instead of launching anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<Report>>>,
}

impl RecordingReporter {
    /// Creates a reporter with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded calls in order.
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool {
        let report = Report {
            received: received.to_owned(),
            approved: approved.to_owned(),
            received_contents: std::fs::read_to_string(received).ok(),
        };
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
        true
    }
}
