//! Validated test identities.
//!
//! A [`TestIdentity`] is the stem shared by a test's approved and received
//! files. Identities must be safe to use as a single file name component:
//! ASCII letters, digits, `_`, `-` and `.` only, never starting with `.` and
//! never containing `..`.

use std::fmt;

use super::error::ApprovalError;

/// Separator placed between module path segments and the test name.
const SEGMENT_SEPARATOR: &str = ".";

/// A validated, file-name-safe test identity.
///
/// Construction (via [`TestIdentity::new`] or
/// [`TestIdentity::from_test_path`]) ensures the same test always maps to
/// the same approval files and that two identities can only collide if
/// their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestIdentity(String);

impl TestIdentity {
    /// Creates a new `TestIdentity` after validating the input.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::InvalidIdentity`] if the string fails
    /// validation.
    ///
    /// # Examples
    ///
    ///     use approvals::TestIdentity;
    ///
    ///     assert!(TestIdentity::new("orders.totals_are_rounded").is_ok());
    ///     assert!(TestIdentity::new("../escape").is_err());
    pub fn new(identity: impl Into<String>) -> Result<Self, ApprovalError> {
        let value = identity.into();
        validate_identity(&value)?;
        Ok(Self(value))
    }

    /// Builds an identity from a Rust module path and a test function name.
    ///
    /// `module_path!()` segments are joined with `.` and the function name is
    /// appended, so `billing::tests` + `totals` becomes `billing.tests.totals`.
    /// A raw-identifier prefix (`r#`) on the function name is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::InvalidIdentity`] if the resulting identity
    /// fails validation.
    pub fn from_test_path(module_path: &str, test_name: &str) -> Result<Self, ApprovalError> {
        let name = test_name.strip_prefix("r#").unwrap_or(test_name);
        let identity = module_path
            .split("::")
            .filter(|segment| !segment.is_empty())
            .chain(std::iter::once(name))
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR);
        Self::new(identity)
    }

    /// Returns the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for TestIdentity {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for TestIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_identity(s: &str) -> Result<(), ApprovalError> {
    let reason = if s.is_empty() {
        Some("identity must not be empty")
    } else if !s.chars().all(is_identity_char) {
        Some("only ASCII letters, digits, '_', '-' and '.' are allowed")
    } else if s.starts_with('.') {
        Some("identity must not start with '.'")
    } else if s.contains("..") {
        Some("identity must not contain '..'")
    } else {
        None
    };

    reason.map_or(Ok(()), |text| {
        Err(ApprovalError::InvalidIdentity {
            identity: s.to_owned(),
            reason: text.to_owned(),
        })
    })
}

const fn is_identity_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}
