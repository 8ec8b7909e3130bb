//! Logs the command that accepts a received file.

use camino::Utf8Path;

use super::Reporter;

/// Emits the shell command that promotes the received file to approved.
///
/// Useful on CI, where no diff tool can be launched but the log is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandLineReporter;

impl CommandLineReporter {
    /// Returns the command that moves `received` over `approved`.
    #[must_use]
    pub fn approve_command(received: &Utf8Path, approved: &Utf8Path) -> String {
        let verb = if cfg!(windows) { "move /Y" } else { "mv" };
        format!("{verb} \"{received}\" \"{approved}\"")
    }
}

impl Reporter for CommandLineReporter {
    fn report(&self, received: &Utf8Path, approved: &Utf8Path) -> bool {
        let command = Self::approve_command(received, approved);
        tracing::info!(%command, "to approve the received output, run");
        true
    }
}
