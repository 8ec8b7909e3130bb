//! Approval testing for Rust.
//!
//! A test renders a value to text, the text is written to a *received*
//! file, and that file is compared byte-for-byte with the test's *approved*
//! file. A match removes the received file; a mismatch keeps it, hands both
//! paths to a [`Reporter`], and fails the test with
//! [`ApprovalError::Mismatch`]. Accepting a change means copying the
//! received file over the approved one.
//!
//! ```no_run
//! use approvals::{ApprovalError, approval_test, verify};
//!
//! #[approval_test]
//! fn greeting() -> Result<(), ApprovalError> {
//!     verify(format!("hello, {}", "world"))
//! }
//! ```
//!
//! Files are named `<dir>/<identity>.approved.txt` and
//! `<dir>/<identity>.received.txt`, where `<dir>` is the directory of the
//! test's source file and `<identity>` is its module path and function name
//! joined with dots.

extern crate self as approvals;

mod approver;
mod combinations;
mod config;
mod error;
mod format;
mod fs;
mod identity;
mod json;
mod namer;
mod registry;
/// Reporters that present mismatches.
pub mod reporter;
mod scope;
mod verify;
mod writer;

pub use approvals_macros::approval_test;
pub use approver::FileApprover;
pub use combinations::CartesianIndices;
pub use config::{DIFF_TOOL_VAR, REPORTER_VAR, ReporterKind, Settings};
pub use error::{ApprovalError, ComparisonFailure};
pub use format::{NumberedList, args_and_result};
pub use fs::{ApprovalDir, read_text_file};
pub use identity::TestIdentity;
pub use json::to_json;
pub use namer::{ApprovalUnit, Namer, source_directory};
pub use registry::{
    clear_default_reporter, get_default_reporter, set_default_reporter, set_default_reporter_arc,
};
pub use reporter::{
    CommandLineReporter, DiffReporter, FileLauncherReporter, FirstWorkingReporter,
    GenericDiffReporter, MultiReporter, QuietReporter, Reporter,
};
pub use scope::TestScope;
pub use verify::{
    Verifier, verify, verify_all, verify_all_combinations, verify_all_combinations_with,
    verify_all_combinations2, verify_all_combinations2_with, verify_all_combinations3,
    verify_all_combinations3_with, verify_all_with, verify_as_json, verify_file,
};
pub use writer::{DEFAULT_EXTENSION, StringWriter, Writer};
