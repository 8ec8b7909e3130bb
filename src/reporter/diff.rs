//! Diff-tool reporters.

use std::env;

use camino::{Utf8Path, Utf8PathBuf};

use super::{Reporter, spawn_detached};
use crate::fs::ApprovalDir;

/// An external diff program and the arguments placed before the two paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTool {
    name: String,
    program: String,
    args: Vec<String>,
}

impl DiffTool {
    /// Creates a tool description. The received and approved paths are
    /// appended after `args` when the tool is launched.
    #[must_use]
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
        }
    }

    /// Parses a whitespace-separated command line such as `meld` or
    /// `code --wait --diff`. Returns `None` for a blank command.
    #[must_use]
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace().map(str::to_owned);
        let program = words.next()?;
        Some(Self::new(program.clone(), program, words.collect()))
    }

    /// The diff tools probed by [`DiffReporter::default`], in priority order.
    #[must_use]
    pub fn known() -> Vec<Self> {
        const KNOWN: &[(&str, &str, &[&str])] = &[
            ("Meld", "meld", &[]),
            ("KDiff3", "kdiff3", &[]),
            ("FileMerge", "opendiff", &[]),
            ("P4Merge", "p4merge", &[]),
            ("Beyond Compare", "bcomp", &[]),
            ("Diffuse", "diffuse", &[]),
            ("TkDiff", "tkdiff", &[]),
            ("Visual Studio Code", "code", &["--wait", "--diff"]),
        ];
        KNOWN
            .iter()
            .map(|&(name, program, args)| {
                Self::new(name, program, args.iter().map(|&arg| arg.to_owned()).collect())
            })
            .collect()
    }

    /// Human-readable tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Program name or path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before the received and approved paths.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Locates `program` on the host.
///
/// A program containing a path separator is checked as a path; a bare name
/// is searched for in each `PATH` entry (with `.exe` also tried on
/// Windows).
#[must_use]
pub fn find_program(program: &str) -> Option<Utf8PathBuf> {
    let candidate = Utf8Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_owned());
    }

    let search_path = env::var_os("PATH")?;
    env::split_paths(&search_path)
        .filter_map(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn executable_names(program: &str) -> impl Iterator<Item = String> {
    let windows_name = cfg!(windows).then(|| format!("{program}.exe"));
    std::iter::once(program.to_owned()).chain(windows_name)
}

/// Launches one specific diff tool, if it is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericDiffReporter {
    tool: DiffTool,
}

impl GenericDiffReporter {
    /// Creates a reporter for `tool`.
    #[must_use]
    pub const fn new(tool: DiffTool) -> Self {
        Self { tool }
    }

    /// Returns the wrapped tool.
    #[must_use]
    pub const fn tool(&self) -> &DiffTool {
        &self.tool
    }

    /// Returns `true` if the tool's program can be found.
    #[must_use]
    pub fn is_working(&self) -> bool {
        find_program(&self.tool.program).is_some()
    }
}

impl Reporter for GenericDiffReporter {
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool {
        let Some(program) = find_program(&self.tool.program) else {
            tracing::trace!(tool = %self.tool.name, "diff tool not installed");
            return false;
        };
        ensure_approved_exists(approved);

        let mut args: Vec<&str> = self.tool.args.iter().map(String::as_str).collect();
        args.extend([received.as_str(), approved.as_str()]);
        tracing::info!(tool = %self.tool.name, %received, %approved, "opening diff tool");
        spawn_detached(program.as_str(), &args)
    }
}

// Diff tools refuse to open a missing file, so a first-run comparison is
// shown against an empty approved file.
fn ensure_approved_exists(approved: &Utf8Path) {
    let (Some(parent), Some(name)) = (approved.parent(), approved.file_name()) else {
        return;
    };
    let created = ApprovalDir::open(parent).and_then(|dir| dir.create_empty_if_missing(name));
    if let Err(error) = created {
        tracing::warn!(%approved, error = %error, "could not create empty approved file");
    }
}

/// Opens the mismatch in the first installed diff tool.
///
/// Inert when none of its tools is installed: `report` returns `false` and
/// the verification failure stands on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReporter {
    reporters: Vec<GenericDiffReporter>,
}

impl DiffReporter {
    /// Creates a reporter that probes `tools` in order.
    #[must_use]
    pub fn with_tools(tools: Vec<DiffTool>) -> Self {
        Self {
            reporters: tools.into_iter().map(GenericDiffReporter::new).collect(),
        }
    }

    /// Returns the probed tools in priority order.
    #[must_use]
    pub fn tools(&self) -> Vec<&DiffTool> {
        self.reporters.iter().map(GenericDiffReporter::tool).collect()
    }

    /// Returns `true` if at least one tool is installed.
    #[must_use]
    pub fn is_working(&self) -> bool {
        self.reporters.iter().any(GenericDiffReporter::is_working)
    }
}

impl Default for DiffReporter {
    fn default() -> Self {
        Self::with_tools(DiffTool::known())
    }
}

impl Reporter for DiffReporter {
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool {
        let handled = self
            .reporters
            .iter()
            .any(|reporter| reporter.report(received, approved));
        if !handled {
            tracing::debug!(%received, "no diff tool available, skipping report");
        }
        handled
    }
}
