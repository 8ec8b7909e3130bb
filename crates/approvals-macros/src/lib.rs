//! Procedural macros for the `approvals` crate.
//!
//! `#[approval_test]` marks a test whose approval files are named after the
//! test itself. The generated test installs an `approvals::TestScope` built
//! from the call site's `module_path!()`, `file!()` and
//! `CARGO_MANIFEST_DIR`, so `approvals::verify` needs no explicit name.

mod expand;

use proc_macro::TokenStream;

/// Turns a zero-argument function into a `#[test]` bound to its own
/// approval files.
///
/// The function may return `()` or any type a `#[test]` may return, such as
/// `Result<(), approvals::ApprovalError>`.
///
/// ```ignore
/// use approvals::{ApprovalError, approval_test, verify};
///
/// #[approval_test]
/// fn renders_invoice() -> Result<(), ApprovalError> {
///     verify("total: 42")
/// }
/// ```
#[proc_macro_attribute]
pub fn approval_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand::approval_test(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
