//! User-facing verification entry points.
//!
//! The free functions resolve the current test through its [`TestScope`]
//! and use the thread's default reporter. [`Verifier`] does the same work
//! against an explicit [`Namer`] and reporter.
//!
//! [`TestScope`]: crate::TestScope

use std::fmt;
use std::sync::Arc;

use camino::Utf8Path;
use serde::Serialize;

use super::approver::FileApprover;
use super::combinations::CartesianIndices;
use super::error::ApprovalError;
use super::format::{NumberedList, args_and_result};
use super::fs::read_text_file;
use super::json::to_json;
use super::namer::Namer;
use super::registry::get_default_reporter;
use super::reporter::Reporter;
use super::writer::{StringWriter, Writer};

/// Verifies values against one test's approved files.
#[derive(Debug, Clone)]
pub struct Verifier {
    namer: Namer,
    reporter: Arc<dyn Reporter>,
}

impl Verifier {
    /// Creates a verifier for `namer` that reports through the thread's
    /// default reporter.
    #[must_use]
    pub fn new(namer: Namer) -> Self {
        Self {
            namer,
            reporter: get_default_reporter(),
        }
    }

    /// Creates a verifier for the test running on this thread.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Configuration`] when no test scope is active.
    pub fn for_current_test() -> Result<Self, ApprovalError> {
        Namer::for_current_test().map(Self::new)
    }

    /// Replaces the reporter used on mismatch.
    #[must_use]
    pub fn with_reporter(self, reporter: impl Reporter + 'static) -> Self {
        self.with_shared_reporter(Arc::new(reporter))
    }

    /// Replaces the reporter with an already shared one.
    #[must_use]
    pub fn with_shared_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Returns the namer that locates this verifier's files.
    #[must_use]
    pub const fn namer(&self) -> &Namer {
        &self.namer
    }

    /// Verifies the output of an arbitrary [`Writer`].
    ///
    /// # Errors
    ///
    /// See [`FileApprover::verify`].
    pub fn verify_writer(&self, writer: &dyn Writer) -> Result<(), ApprovalError> {
        FileApprover.verify(&self.namer, writer, self.reporter.as_ref())
    }

    /// Verifies the `Display` rendering of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Mismatch`] when the text differs from the
    /// approved file, or an I/O error if the files cannot be accessed.
    pub fn verify(&self, value: impl fmt::Display) -> Result<(), ApprovalError> {
        self.verify_writer(&StringWriter::new(value))
    }

    /// Verifies a header followed by a numbered line per item.
    ///
    /// The text is `header`, a blank line, then `"{index}) {item}"` per item
    /// with indices starting at `0`. The whole list is one approval.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub fn verify_all<I>(&self, header: &str, items: I) -> Result<(), ApprovalError>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let mut numbering = NumberedList::new();
        self.verify_all_with(header, items, |item| numbering.format(item))
    }

    /// Verifies a header followed by one `formatter` line per item.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub fn verify_all_with<I, F>(
        &self,
        header: &str,
        items: I,
        mut formatter: F,
    ) -> Result<(), ApprovalError>
    where
        I: IntoIterator,
        F: FnMut(&I::Item) -> String,
    {
        let mut text = format!("{header}\n\n");
        for item in items {
            text.push_str(&formatter(&item));
            text.push('\n');
        }
        self.verify(text)
    }

    /// Calls `function` with every combination of `inputs` and verifies all
    /// results as one approval.
    ///
    /// Combinations are enumerated with the leftmost list varying slowest.
    /// An `Err` returned by `function` is recorded as that combination's
    /// result instead of stopping the run.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`]. Errors returned by `function` are data and
    /// never surface here.
    pub fn verify_all_combinations<T, S, R, E, F>(
        &self,
        function: F,
        inputs: &[S],
    ) -> Result<(), ApprovalError>
    where
        S: AsRef<[T]>,
        T: fmt::Debug,
        R: fmt::Debug,
        E: fmt::Debug,
        F: FnMut(&[&T]) -> Result<R, E>,
    {
        self.verify_all_combinations_with(function, inputs, |args, result| {
            args_and_result(args, result)
        })
    }

    /// Like [`Verifier::verify_all_combinations`] with a custom formatter.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub fn verify_all_combinations_with<T, S, R, E, F, G>(
        &self,
        mut function: F,
        inputs: &[S],
        mut formatter: G,
    ) -> Result<(), ApprovalError>
    where
        S: AsRef<[T]>,
        F: FnMut(&[&T]) -> Result<R, E>,
        G: FnMut(&[&T], &Result<R, E>) -> String,
    {
        let lists: Vec<&[T]> = inputs.iter().map(AsRef::as_ref).collect();
        let mut text = String::new();
        for indices in CartesianIndices::new(lists.iter().map(|list| list.len()).collect()) {
            let args: Vec<&T> = lists
                .iter()
                .zip(&indices)
                .filter_map(|(list, &index)| list.get(index))
                .collect();
            let result = function(args.as_slice());
            text.push_str(&formatter(args.as_slice(), &result));
        }
        self.verify(text)
    }

    /// Two-argument form of [`Verifier::verify_all_combinations`] for lists
    /// of different types.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub fn verify_all_combinations2<A, B, R, E, F>(
        &self,
        function: F,
        first: &[A],
        second: &[B],
    ) -> Result<(), ApprovalError>
    where
        A: fmt::Debug,
        B: fmt::Debug,
        R: fmt::Debug,
        E: fmt::Debug,
        F: FnMut(&A, &B) -> Result<R, E>,
    {
        self.verify_all_combinations2_with(function, first, second, |args, result| {
            args_and_result(&args, result)
        })
    }

    /// Like [`Verifier::verify_all_combinations2`] with a custom formatter.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub fn verify_all_combinations2_with<A, B, R, E, F, G>(
        &self,
        mut function: F,
        first: &[A],
        second: &[B],
        mut formatter: G,
    ) -> Result<(), ApprovalError>
    where
        F: FnMut(&A, &B) -> Result<R, E>,
        G: FnMut((&A, &B), &Result<R, E>) -> String,
    {
        let mut text = String::new();
        for a in first {
            for b in second {
                let result = function(a, b);
                text.push_str(&formatter((a, b), &result));
            }
        }
        self.verify(text)
    }

    /// Three-argument form of [`Verifier::verify_all_combinations`] for lists
    /// of different types.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub fn verify_all_combinations3<A, B, C, R, E, F>(
        &self,
        function: F,
        first: &[A],
        second: &[B],
        third: &[C],
    ) -> Result<(), ApprovalError>
    where
        A: fmt::Debug,
        B: fmt::Debug,
        C: fmt::Debug,
        R: fmt::Debug,
        E: fmt::Debug,
        F: FnMut(&A, &B, &C) -> Result<R, E>,
    {
        self.verify_all_combinations3_with(function, first, second, third, |args, result| {
            args_and_result(&args, result)
        })
    }

    /// Like [`Verifier::verify_all_combinations3`] with a custom formatter.
    ///
    /// # Errors
    ///
    /// See [`Verifier::verify`].
    pub fn verify_all_combinations3_with<A, B, C, R, E, F, G>(
        &self,
        mut function: F,
        first: &[A],
        second: &[B],
        third: &[C],
        mut formatter: G,
    ) -> Result<(), ApprovalError>
    where
        F: FnMut(&A, &B, &C) -> Result<R, E>,
        G: FnMut((&A, &B, &C), &Result<R, E>) -> String,
    {
        let mut text = String::new();
        for a in first {
            for b in second {
                for c in third {
                    let result = function(a, b, c);
                    text.push_str(&formatter((a, b, c), &result));
                }
            }
        }
        self.verify(text)
    }

    /// Verifies `value` as sorted, 4-space-indented JSON plus a trailing
    /// newline.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Serialization`] if `value` cannot be
    /// rendered, otherwise see [`Verifier::verify`].
    pub fn verify_as_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ApprovalError> {
        let mut text = to_json(value)?;
        text.push('\n');
        self.verify(text)
    }

    /// Verifies the full text of an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Io`] if `path` cannot be read, otherwise see
    /// [`Verifier::verify`].
    pub fn verify_file(&self, path: impl AsRef<Utf8Path>) -> Result<(), ApprovalError> {
        let text = read_text_file(path.as_ref())?;
        self.verify(text)
    }
}

/// Verifies the `Display` rendering of `value` for the current test.
///
/// # Errors
///
/// Returns [`ApprovalError::Configuration`] outside an approval test,
/// [`ApprovalError::Mismatch`] when the output differs from the approved
/// file, and [`ApprovalError::Io`] when the files cannot be accessed.
pub fn verify(value: impl fmt::Display) -> Result<(), ApprovalError> {
    Verifier::for_current_test()?.verify(value)
}

/// Verifies a header and a numbered list of items for the current test.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_all<I>(header: &str, items: I) -> Result<(), ApprovalError>
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    Verifier::for_current_test()?.verify_all(header, items)
}

/// Verifies a header and one custom-formatted line per item for the current
/// test.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_all_with<I, F>(header: &str, items: I, formatter: F) -> Result<(), ApprovalError>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> String,
{
    Verifier::for_current_test()?.verify_all_with(header, items, formatter)
}

/// Verifies `function` over every combination of `inputs` for the current
/// test.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_all_combinations<T, S, R, E, F>(
    function: F,
    inputs: &[S],
) -> Result<(), ApprovalError>
where
    S: AsRef<[T]>,
    T: fmt::Debug,
    R: fmt::Debug,
    E: fmt::Debug,
    F: FnMut(&[&T]) -> Result<R, E>,
{
    Verifier::for_current_test()?.verify_all_combinations(function, inputs)
}

/// Like [`verify_all_combinations`] with a custom formatter.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_all_combinations_with<T, S, R, E, F, G>(
    function: F,
    inputs: &[S],
    formatter: G,
) -> Result<(), ApprovalError>
where
    S: AsRef<[T]>,
    F: FnMut(&[&T]) -> Result<R, E>,
    G: FnMut(&[&T], &Result<R, E>) -> String,
{
    Verifier::for_current_test()?.verify_all_combinations_with(function, inputs, formatter)
}

/// Two-argument combination approval for the current test.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_all_combinations2<A, B, R, E, F>(
    function: F,
    first: &[A],
    second: &[B],
) -> Result<(), ApprovalError>
where
    A: fmt::Debug,
    B: fmt::Debug,
    R: fmt::Debug,
    E: fmt::Debug,
    F: FnMut(&A, &B) -> Result<R, E>,
{
    Verifier::for_current_test()?.verify_all_combinations2(function, first, second)
}

/// Like [`verify_all_combinations2`] with a custom formatter.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_all_combinations2_with<A, B, R, E, F, G>(
    function: F,
    first: &[A],
    second: &[B],
    formatter: G,
) -> Result<(), ApprovalError>
where
    F: FnMut(&A, &B) -> Result<R, E>,
    G: FnMut((&A, &B), &Result<R, E>) -> String,
{
    Verifier::for_current_test()?.verify_all_combinations2_with(function, first, second, formatter)
}

/// Three-argument combination approval for the current test.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_all_combinations3<A, B, C, R, E, F>(
    function: F,
    first: &[A],
    second: &[B],
    third: &[C],
) -> Result<(), ApprovalError>
where
    A: fmt::Debug,
    B: fmt::Debug,
    C: fmt::Debug,
    R: fmt::Debug,
    E: fmt::Debug,
    F: FnMut(&A, &B, &C) -> Result<R, E>,
{
    Verifier::for_current_test()?.verify_all_combinations3(function, first, second, third)
}

/// Like [`verify_all_combinations3`] with a custom formatter.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_all_combinations3_with<A, B, C, R, E, F, G>(
    function: F,
    first: &[A],
    second: &[B],
    third: &[C],
    formatter: G,
) -> Result<(), ApprovalError>
where
    F: FnMut(&A, &B, &C) -> Result<R, E>,
    G: FnMut((&A, &B, &C), &Result<R, E>) -> String,
{
    Verifier::for_current_test()?
        .verify_all_combinations3_with(function, first, second, third, formatter)
}

/// Verifies `value` as deterministic JSON for the current test.
///
/// # Errors
///
/// See [`verify`]; also [`ApprovalError::Serialization`].
pub fn verify_as_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ApprovalError> {
    Verifier::for_current_test()?.verify_as_json(value)
}

/// Verifies the contents of an existing file for the current test.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_file(path: impl AsRef<Utf8Path>) -> Result<(), ApprovalError> {
    Verifier::for_current_test()?.verify_file(path)
}
