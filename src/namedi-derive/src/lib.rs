mod attrs;
mod lifecycle;
mod target;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{DeriveInput, ItemImpl, Result as SynResult};

/// Implements `InjectionTarget` for a struct, using the fields marked with
/// `#[inject]` or `#[inject(name = "...")]` as injection points.
///
/// `#[injection(hooks)]` on the struct forwards hook lookups to the type's
/// `LifecycleHooks` implementation, usually generated by `#[lifecycle]`, and
/// implements `HooksForwarded`. `#[lifecycle]` on a type without it is a
/// compile error.
#[proc_macro_derive(InjectionTarget, attributes(inject, injection))]
pub fn derive_injection_target(input: TokenStream) -> TokenStream {
    match derive_injection_target_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn derive_injection_target_impl(input: TokenStream) -> SynResult<TokenStream2> {
    let input = syn::parse::<DeriveInput>(input)?;
    let target_data = target::parse_target(input)?;
    Ok(target::expand_injection_target(target_data))
}

/// Implements `LifecycleHooks` for the type of an inherent `impl` block, using
/// the methods marked with `#[hook]` or `#[hook(name = "...")]`.
///
/// Each hook is named after its method and requests injections named after
/// its declared parameters.
#[proc_macro_attribute]
pub fn lifecycle(attr: TokenStream, item: TokenStream) -> TokenStream {
    match lifecycle_impl(attr, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn lifecycle_impl(attr: TokenStream, item: TokenStream) -> SynResult<TokenStream2> {
    attrs::ensure_empty(attr, "`#[lifecycle]` doesn't take any argument")?;
    let impls = match syn::parse::<ItemImpl>(item) {
        Ok(impls) => impls,
        Err(err) => {
            return Err(syn::Error::new(
                err.span(),
                "`#[lifecycle]` should be annotated on the `impl` block",
            ))
        }
    };
    lifecycle::expand_lifecycle(impls)
}
