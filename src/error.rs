//! Error types for approval verification.

use std::fmt;

use camino::Utf8PathBuf;

/// Errors that can occur while verifying output against approved files.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    /// The current test identity could not be resolved.
    #[error("approval configuration error: {reason}")]
    Configuration {
        /// A human-readable explanation of what is missing.
        reason: String,
    },

    /// A test identity failed lexical validation.
    #[error("invalid test identity '{identity}': {reason}")]
    InvalidIdentity {
        /// The identity string that failed validation.
        identity: String,
        /// A human-readable explanation of why the identity is invalid.
        reason: String,
    },

    /// The value under test could not be turned into comparable text.
    #[error("serialization failed: {message}")]
    Serialization {
        /// The serializer's error message.
        message: String,
    },

    /// Reading, writing, or removing an approval artifact failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The file or directory the operation targeted.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Received output differs from the approved file.
    #[error(transparent)]
    Mismatch(#[from] ComparisonFailure),
}

impl ApprovalError {
    /// Returns `true` when this error is the expected "output changed"
    /// signal rather than an environmental failure.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }

    /// Returns the comparison failure carried by this error, if any.
    #[must_use]
    pub const fn comparison_failure(&self) -> Option<&ComparisonFailure> {
        match self {
            Self::Mismatch(failure) => Some(failure),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Details of a received/approved mismatch.
///
/// The received file named here is left on disk so it can be inspected and,
/// once correct, copied over the approved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonFailure {
    /// Path of the freshly written received file.
    pub received: Utf8PathBuf,
    /// Path of the approved file the output was compared against.
    pub approved: Utf8PathBuf,
    /// Whether the approved file was absent (first run).
    pub approved_missing: bool,
    /// 1-indexed number of the first line that differs.
    pub first_mismatched_line: usize,
}

impl fmt::Display for ComparisonFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "approval mismatch at line {}\n  received: {}\n  approved: {}",
            self.first_mismatched_line, self.received, self.approved
        )?;
        if self.approved_missing {
            f.write_str(" (does not exist yet)")?;
        }
        Ok(())
    }
}

impl std::error::Error for ComparisonFailure {}
