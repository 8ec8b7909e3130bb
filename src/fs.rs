//! Directory-scoped file access for approval artifacts.
//!
//! All reads, writes, and removals go through a capability handle on the
//! approval directory, so an artifact name can never reach outside it.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::error::ApprovalError;

/// An open approval directory.
#[derive(Debug)]
pub struct ApprovalDir {
    path: Utf8PathBuf,
    dir: Dir,
}

impl ApprovalDir {
    /// Opens an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Io`] if the directory does not exist or
    /// cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, ApprovalError> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|source| ApprovalError::io(path, source))?;
        Ok(Self {
            path: path.to_owned(),
            dir,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the full path of `name` inside this directory.
    #[must_use]
    pub fn join(&self, name: &str) -> Utf8PathBuf {
        self.path.join(name)
    }

    /// Writes `contents` to `name`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Io`] if the write fails.
    pub fn write(&self, name: &str, contents: &str) -> Result<(), ApprovalError> {
        self.dir
            .write(name, contents)
            .map_err(|source| ApprovalError::io(self.join(name), source))
    }

    /// Reads the raw bytes of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Io`] if the file is missing or unreadable.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, ApprovalError> {
        self.dir
            .read(name)
            .map_err(|source| ApprovalError::io(self.join(name), source))
    }

    /// Reads the raw bytes of `name`, returning `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Io`] for any failure other than the file
    /// being absent.
    pub fn read_optional(&self, name: &str) -> Result<Option<Vec<u8>>, ApprovalError> {
        match self.dir.read(name) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ApprovalError::io(self.join(name), source)),
        }
    }

    /// Returns `true` if `name` exists in this directory.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.dir.exists(name)
    }

    /// Removes `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Io`] if the removal fails.
    pub fn remove(&self, name: &str) -> Result<(), ApprovalError> {
        self.dir
            .remove_file(name)
            .map_err(|source| ApprovalError::io(self.join(name), source))
    }

    /// Creates `name` as an empty file unless it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Io`] if the file has to be created and
    /// creation fails.
    pub fn create_empty_if_missing(&self, name: &str) -> Result<(), ApprovalError> {
        if self.exists(name) {
            return Ok(());
        }
        self.write(name, "")
    }
}

/// Reads an arbitrary UTF-8 text file.
///
/// # Errors
///
/// Returns [`ApprovalError::Io`] if the path has no file name, its parent
/// directory cannot be opened, or the file cannot be read as UTF-8.
pub fn read_text_file(path: &Utf8Path) -> Result<String, ApprovalError> {
    let Some(name) = path.file_name() else {
        return Err(ApprovalError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = ApprovalDir::open(parent)?;
    dir.dir
        .read_to_string(name)
        .map_err(|source| ApprovalError::io(path, source))
}
