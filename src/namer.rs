//! Deterministic naming of approval artifacts.
//!
//! A [`Namer`] pairs the directory holding a test's approval files with the
//! test's [`TestIdentity`]. Everything else is derived:
//!
//! - approved file: `<dir>/<identity>.approved<ext>`
//! - received file: `<dir>/<identity>.received<ext>`

use camino::{Utf8Path, Utf8PathBuf};

use super::error::ApprovalError;
use super::identity::TestIdentity;
use super::scope::TestScope;

/// Token distinguishing the accepted reference file.
const APPROVED_TOKEN: &str = "approved";
/// Token distinguishing the candidate output file.
const RECEIVED_TOKEN: &str = "received";

/// Resolves the directory and stem for one test's approval files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namer {
    directory: Utf8PathBuf,
    identity: TestIdentity,
}

impl Namer {
    /// Creates a namer for an explicit directory and identity.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>, identity: TestIdentity) -> Self {
        Self {
            directory: directory.into(),
            identity,
        }
    }

    /// Returns the namer installed by the active [`TestScope`] on this
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Configuration`] when no scope is active, for
    /// example when `verify` is called from a plain `#[test]` instead of an
    /// `#[approval_test]`.
    pub fn for_current_test() -> Result<Self, ApprovalError> {
        TestScope::current().ok_or_else(|| ApprovalError::Configuration {
            reason: concat!(
                "no test identity is active on this thread; annotate the test ",
                "with #[approval_test], enter a TestScope, or use ",
                "Verifier::new with an explicit Namer",
            )
            .to_owned(),
        })
    }

    /// Returns the directory holding the approval files.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Returns the test identity.
    #[must_use]
    pub const fn identity(&self) -> &TestIdentity {
        &self.identity
    }

    /// Returns `<dir>/<identity>`, the path every artifact name starts with.
    #[must_use]
    pub fn base_name(&self) -> Utf8PathBuf {
        self.directory.join(self.identity.as_str())
    }

    /// Returns the artifact pair for a writer's file extension.
    #[must_use]
    pub fn unit(&self, extension: &str) -> ApprovalUnit {
        ApprovalUnit::new(self.directory.clone(), self.identity.as_str(), extension)
    }
}

/// The approved/received file pair belonging to one verification.
///
/// Both files live in the same directory, share the same stem, and carry
/// the same extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalUnit {
    directory: Utf8PathBuf,
    approved_file_name: String,
    received_file_name: String,
}

impl ApprovalUnit {
    fn new(directory: Utf8PathBuf, stem: &str, extension: &str) -> Self {
        let ext = normalize_extension(extension);
        Self {
            directory,
            approved_file_name: format!("{stem}.{APPROVED_TOKEN}{ext}"),
            received_file_name: format!("{stem}.{RECEIVED_TOKEN}{ext}"),
        }
    }

    /// Returns the directory holding both files.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Returns the approved file's name without its directory.
    #[must_use]
    pub fn approved_file_name(&self) -> &str {
        &self.approved_file_name
    }

    /// Returns the received file's name without its directory.
    #[must_use]
    pub fn received_file_name(&self) -> &str {
        &self.received_file_name
    }

    /// Returns the full approved file path.
    #[must_use]
    pub fn approved_path(&self) -> Utf8PathBuf {
        self.directory.join(&self.approved_file_name)
    }

    /// Returns the full received file path.
    #[must_use]
    pub fn received_path(&self) -> Utf8PathBuf {
        self.directory.join(&self.received_file_name)
    }
}

fn normalize_extension(extension: &str) -> String {
    if extension.is_empty() || extension.starts_with('.') {
        extension.to_owned()
    } else {
        format!(".{extension}")
    }
}

/// Resolves the directory containing a test's source file.
///
/// `manifest_dir` is the crate's `CARGO_MANIFEST_DIR` and `source_file` is
/// the test's `file!()`. Absolute source paths resolve to their parent.
/// Relative ones are tried against the manifest directory and then each of
/// its ancestors, because `file!()` is relative to the workspace root for
/// workspace members. If no candidate exists on disk the manifest-relative
/// parent is returned.
#[must_use]
pub fn source_directory(manifest_dir: &str, source_file: &str) -> Utf8PathBuf {
    let source = Utf8Path::new(source_file);
    let source_parent = source.parent().unwrap_or_else(|| Utf8Path::new(""));
    if source.is_absolute() {
        return source_parent.to_owned();
    }

    let manifest = Utf8Path::new(manifest_dir);
    manifest
        .ancestors()
        .find(|ancestor| ancestor.join(source).is_file())
        .map_or_else(
            || manifest.join(source_parent),
            |ancestor| ancestor.join(source_parent),
        )
}

#[cfg(test)]
#[path = "namer_tests.rs"]
mod tests;
