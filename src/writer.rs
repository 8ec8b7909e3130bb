//! Turning values into comparable text.

use std::fmt::{self, Write as _};

use camino::Utf8PathBuf;

use super::error::ApprovalError;
use super::fs::ApprovalDir;
use super::namer::ApprovalUnit;

/// Extension used by text writers unless overridden.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Serializes a value for approval.
pub trait Writer {
    /// Returns the complete text to compare.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Serialization`] if the value cannot be
    /// rendered.
    fn text(&self) -> Result<String, ApprovalError>;

    /// Returns the file extension, including the leading dot.
    fn extension(&self) -> &str;

    /// Writes the received file for `unit` and returns its path.
    ///
    /// The text is produced before anything touches the disk, so a
    /// serialization failure never leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// Propagates [`Writer::text`] errors and returns [`ApprovalError::Io`]
    /// if the file cannot be written.
    fn write_received_file(
        &self,
        dir: &ApprovalDir,
        unit: &ApprovalUnit,
    ) -> Result<Utf8PathBuf, ApprovalError> {
        let text = self.text()?;
        dir.write(unit.received_file_name(), &text)?;
        tracing::debug!(path = %unit.received_path(), bytes = text.len(), "wrote received file");
        Ok(unit.received_path())
    }
}

/// Writes the `Display` rendering of a value.
///
/// A `Display` implementation that returns [`fmt::Error`] surfaces as
/// [`ApprovalError::Serialization`] from [`Writer::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringWriter {
    rendered: Result<String, fmt::Error>,
    extension: String,
}

impl StringWriter {
    /// Renders `value` with [`DEFAULT_EXTENSION`].
    #[must_use]
    pub fn new(value: impl fmt::Display) -> Self {
        let mut text = String::new();
        let rendered = write!(text, "{value}").map(|()| text);
        Self {
            rendered,
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }

    /// Overrides the file extension (for example `.json` to match an
    /// existing corpus).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

impl Writer for StringWriter {
    fn text(&self) -> Result<String, ApprovalError> {
        self.rendered
            .clone()
            .map_err(|fmt::Error| ApprovalError::Serialization {
                message: "the value's Display implementation returned an error".to_owned(),
            })
    }

    fn extension(&self) -> &str {
        &self.extension
    }
}
