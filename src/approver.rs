//! The approve-verify algorithm.
//!
//! [`FileApprover::verify`] always runs the same steps, in this order:
//!
//! 1. write the received file from the writer's text;
//! 2. read the approved file, treating a missing one as empty;
//! 3. compare the bytes on disk;
//! 4. on a match remove the received file, otherwise hand both paths to the
//!    reporter and return [`ApprovalError::Mismatch`].
//!
//! The outcome is fixed before the reporter runs, so a reporter can never
//! turn a failure into a pass or hide it behind its own error.

use super::error::{ApprovalError, ComparisonFailure};
use super::fs::ApprovalDir;
use super::namer::Namer;
use super::reporter::Reporter;
use super::writer::Writer;

/// Compares writer output against the approved file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileApprover;

impl FileApprover {
    /// Verifies `writer`'s output against the approved file named by `namer`.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Mismatch`] when the output differs from the
    /// approved file (including the first run, when there is no approved
    /// file and the output is not empty). Writer errors and
    /// [`ApprovalError::Io`] failures propagate unchanged.
    pub fn verify(
        &self,
        namer: &Namer,
        writer: &dyn Writer,
        reporter: &dyn Reporter,
    ) -> Result<(), ApprovalError> {
        let unit = namer.unit(writer.extension());
        let dir = ApprovalDir::open(unit.directory())?;

        let received_path = writer.write_received_file(&dir, &unit)?;
        let received = dir.read(unit.received_file_name())?;
        let approved = dir.read_optional(unit.approved_file_name())?;
        let approved_missing = approved.is_none();
        let approved_bytes = approved.unwrap_or_default();

        if received == approved_bytes {
            dir.remove(unit.received_file_name())?;
            tracing::debug!(identity = %namer.identity(), "received output matches approved file");
            return Ok(());
        }

        let failure = ComparisonFailure {
            received: received_path,
            approved: unit.approved_path(),
            approved_missing,
            first_mismatched_line: first_mismatched_line(&received, &approved_bytes),
        };
        tracing::info!(
            identity = %namer.identity(),
            received = %failure.received,
            approved = %failure.approved,
            "received output does not match approved file"
        );
        if !reporter.report(&failure.received, &failure.approved) {
            tracing::debug!(?reporter, "reporter did not handle the mismatch");
        }
        Err(failure.into())
    }
}

/// Returns the 1-indexed number of the first line that differs.
///
/// When one text is a prefix of the other the line after the shorter one's
/// last line is reported.
fn first_mismatched_line(received: &[u8], approved: &[u8]) -> usize {
    let mut received_lines = received.split(|&byte| byte == b'\n');
    let mut approved_lines = approved.split(|&byte| byte == b'\n');
    let mut line = 1_usize;
    loop {
        match (received_lines.next(), approved_lines.next()) {
            (Some(left), Some(right)) if left == right => line = line.saturating_add(1),
            _ => return line,
        }
    }
}

#[cfg(test)]
#[path = "approver_tests.rs"]
mod tests;
