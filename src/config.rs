//! Environment-driven configuration.
//!
//! Two variables are recognised:
//!
//! - `APPROVALS_REPORTER`: which reporter to use when no default has been
//!   set on the thread (`diff`, `launcher`, `command-line`, `quiet`).
//! - `APPROVALS_DIFF_TOOL`: a command line (`program args...`) tried before
//!   the built-in diff tools. The received and approved paths are appended.

use std::sync::Arc;

use super::reporter::{
    CommandLineReporter, DiffReporter, DiffTool, FileLauncherReporter, QuietReporter, Reporter,
};

/// Variable selecting the fallback reporter.
pub const REPORTER_VAR: &str = "APPROVALS_REPORTER";
/// Variable naming a preferred diff tool command line.
pub const DIFF_TOOL_VAR: &str = "APPROVALS_DIFF_TOOL";

/// The fallback reporter kinds selectable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReporterKind {
    /// Launch the first available diff tool.
    #[default]
    Diff,
    /// Open the received file with the host's default application.
    Launcher,
    /// Log the command that approves the received file.
    CommandLine,
    /// Do nothing.
    Quiet,
}

impl ReporterKind {
    /// Parses a configuration value, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "diff" => Some(Self::Diff),
            "launcher" | "file-launcher" => Some(Self::Launcher),
            "command-line" | "commandline" => Some(Self::CommandLine),
            "quiet" | "none" => Some(Self::Quiet),
            _ => None,
        }
    }
}

/// Resolved approval settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Reporter used when no thread default is set.
    pub reporter: ReporterKind,
    /// User-supplied diff tool, tried before the built-in list.
    pub diff_tool: Option<DiffTool>,
}

impl Settings {
    /// Reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let reporter = lookup(REPORTER_VAR).map_or_else(ReporterKind::default, |value| {
            ReporterKind::parse(&value).unwrap_or_else(|| {
                tracing::warn!(
                    variable = REPORTER_VAR,
                    value = %value,
                    "unknown reporter, falling back to diff"
                );
                ReporterKind::default()
            })
        });
        let diff_tool =
            lookup(DIFF_TOOL_VAR).and_then(|command| DiffTool::from_command_line(&command));
        Self {
            reporter,
            diff_tool,
        }
    }

    /// Builds the reporter these settings select.
    #[must_use]
    pub fn default_reporter(&self) -> Arc<dyn Reporter> {
        match self.reporter {
            ReporterKind::Diff => Arc::new(self.diff_reporter()),
            ReporterKind::Launcher => Arc::new(FileLauncherReporter),
            ReporterKind::CommandLine => Arc::new(CommandLineReporter),
            ReporterKind::Quiet => Arc::new(QuietReporter),
        }
    }

    /// Builds a diff reporter, preferring the configured tool.
    #[must_use]
    pub fn diff_reporter(&self) -> DiffReporter {
        let tools = self
            .diff_tool
            .iter()
            .cloned()
            .chain(DiffTool::known())
            .collect();
        DiffReporter::with_tools(tools)
    }
}
