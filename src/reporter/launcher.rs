//! Opens the received file with the host's default application.

use camino::Utf8Path;

use super::{Reporter, spawn_detached};

/// Opens only the received file, for manual inspection.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLauncherReporter;

impl FileLauncherReporter {
    /// Returns the opener command line for `path` on this host.
    #[must_use]
    pub fn command_for(path: &Utf8Path) -> (&'static str, Vec<&str>) {
        if cfg!(target_os = "macos") {
            ("open", vec![path.as_str()])
        } else if cfg!(windows) {
            ("cmd", vec!["/C", "start", "", path.as_str()])
        } else {
            ("xdg-open", vec![path.as_str()])
        }
    }
}

impl Reporter for FileLauncherReporter {
    fn report(&self, received: &Utf8Path, _approved: &Utf8Path) -> bool {
        let (program, args) = Self::command_for(received);
        tracing::info!(%received, program, "opening received file");
        spawn_detached(program, &args)
    }
}
