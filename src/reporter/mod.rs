//! Reporters that make a failed approval actionable.
//!
//! A reporter runs only after the approver has already decided the outcome,
//! so nothing it does can change whether a verification passes. Launch
//! failures are logged and reported as "not handled", never raised.

mod command_line;
mod diff;
mod launcher;

use std::fmt;
use std::process::{Command, Stdio};
use std::sync::Arc;

use camino::Utf8Path;

pub use command_line::CommandLineReporter;
pub use diff::{DiffReporter, DiffTool, GenericDiffReporter, find_program};
pub use launcher::FileLauncherReporter;

/// Presents a received/approved mismatch to a human.
pub trait Reporter: fmt::Debug + Send + Sync {
    /// Reports a mismatch between `received` and `approved`.
    ///
    /// Returns `true` if the mismatch was handled (a tool was launched, a
    /// message was emitted) and `false` if this reporter could not act.
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool;
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool {
        (**self).report(received, approved)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool {
        (**self).report(received, approved)
    }
}

/// A reporter that does nothing, for headless and batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuietReporter;

impl Reporter for QuietReporter {
    fn report(&self, _received: &Utf8Path, _approved: &Utf8Path) -> bool {
        true
    }
}

/// Tries reporters in order and stops at the first one that handles the
/// mismatch.
#[derive(Debug, Clone, Default)]
pub struct FirstWorkingReporter {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl FirstWorkingReporter {
    /// Creates a reporter from a priority-ordered list.
    #[must_use]
    pub const fn new(reporters: Vec<Arc<dyn Reporter>>) -> Self {
        Self { reporters }
    }

    /// Appends a lower-priority reporter.
    #[must_use]
    pub fn or(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporters.push(Arc::new(reporter));
        self
    }
}

impl Reporter for FirstWorkingReporter {
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool {
        self.reporters
            .iter()
            .any(|reporter| reporter.report(received, approved))
    }
}

/// Runs every reporter, regardless of earlier results.
#[derive(Debug, Clone, Default)]
pub struct MultiReporter {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl MultiReporter {
    /// Creates a reporter that fans out to all of `reporters`.
    #[must_use]
    pub const fn new(reporters: Vec<Arc<dyn Reporter>>) -> Self {
        Self { reporters }
    }

    /// Appends another reporter.
    #[must_use]
    pub fn and(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporters.push(Arc::new(reporter));
        self
    }
}

impl Reporter for MultiReporter {
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool {
        self.reporters.iter().fold(false, |handled, reporter| {
            reporter.report(received, approved) || handled
        })
    }
}

/// Spawns `program` without waiting for it to exit.
///
/// Output streams are detached so a long-running tool cannot block the
/// test. Returns `false`, after logging, if the process fails to start.
pub(crate) fn spawn_detached(program: &str, args: &[&str]) -> bool {
    let spawned = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(child) => {
            tracing::debug!(program, pid = child.id(), "launched reporter process");
            true
        }
        Err(error) => {
            tracing::warn!(program, error = %error, "failed to launch reporter process");
            false
        }
    }
}
