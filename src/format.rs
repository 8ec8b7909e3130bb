//! Default formatters for list and combination approvals.

use std::fmt;

/// Numbers list items as `"{index}) {item}"`, counting from zero.
///
/// Each `verify_all` call builds a fresh `NumberedList`, so numbering never
/// carries over from an earlier call.
#[derive(Debug, Default)]
pub struct NumberedList {
    next: usize,
}

impl NumberedList {
    /// Creates a formatter whose first item is numbered `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Formats `item` with the next index.
    pub fn format(&mut self, item: &impl fmt::Display) -> String {
        let line = format!("{}) {item}", self.next);
        self.next = self.next.saturating_add(1);
        line
    }
}

/// Formats one combination as `args: {args:?} => {result:?}` plus a newline.
///
/// The result is rendered as `Ok(..)` or `Err(..)`, so a failing
/// combination is recorded alongside the passing ones.
pub fn args_and_result<A, R, E>(args: &A, result: &Result<R, E>) -> String
where
    A: fmt::Debug + ?Sized,
    R: fmt::Debug,
    E: fmt::Debug,
{
    format!("args: {args:?} => {result:?}\n")
}
