//! Expansion logic for `#[approval_test]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Error, ItemFn};

/// Expands an `#[approval_test]` function.
///
/// # Errors
///
/// Returns a spanned error when the attribute has arguments, or the function
/// is `async`, generic, takes parameters or has a non-ASCII name.
pub fn approval_test(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(Error::new(
            attr.span(),
            "#[approval_test] does not take arguments",
        ));
    }

    let function: ItemFn = syn::parse2(item)?;
    validate_signature(&function)?;

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = function;
    let test_name = sig.ident.unraw().to_string();

    Ok(quote! {
        #[test]
        #(#attrs)*
        #vis #sig {
            let __approval_scope = ::approvals::TestScope::enter(::approvals::Namer::new(
                ::approvals::source_directory(
                    ::core::env!("CARGO_MANIFEST_DIR"),
                    ::core::file!(),
                ),
                match ::approvals::TestIdentity::from_test_path(
                    ::core::module_path!(),
                    #test_name,
                ) {
                    ::core::result::Result::Ok(identity) => identity,
                    ::core::result::Result::Err(error) => ::core::panic!("{}", error),
                },
            ));
            #block
        }
    })
}

fn validate_signature(function: &ItemFn) -> syn::Result<()> {
    let sig = &function.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new(
            asyncness.span(),
            "#[approval_test] functions must not be async",
        ));
    }
    if !sig.inputs.is_empty() {
        return Err(Error::new(
            sig.inputs.span(),
            "#[approval_test] functions must not take parameters",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(Error::new(
            sig.generics.span(),
            "#[approval_test] functions must not be generic",
        ));
    }
    let name = sig.ident.unraw().to_string();
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::new(
            sig.ident.span(),
            format!(
                "#[approval_test] function name `{name}` must be ASCII because it names the \
                 approval files"
            ),
        ));
    }
    Ok(())
}
