use proc_macro::TokenStream;
use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, Error as SynError, LitStr, Meta, Result as SynResult};

pub fn ensure_empty(attr: TokenStream, message: &str) -> SynResult<()> {
    if attr.is_empty() {
        Ok(())
    } else {
        Err(SynError::new(Span::call_site(), message))
    }
}

pub fn is_attribute(attr: &Attribute, name: &str) -> bool {
    attr.path().is_ident(name)
}

/// Parses `#[attr]` or `#[attr(name = "...")]`, returning the custom name if
/// there is one.
pub fn parse_optional_name(attr: &Attribute) -> SynResult<Option<LitStr>> {
    match &attr.meta {
        Meta::Path(_) => Ok(None),
        Meta::List(_) => {
            let mut name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") && name.is_none() {
                    name = Some(meta.value()?.parse::<LitStr>()?);
                    Ok(())
                } else {
                    Err(meta.error("expects a single `name = \"...\"` argument"))
                }
            })?;
            Ok(name)
        }
        Meta::NameValue(nv) => Err(SynError::new(
            nv.span(),
            "expects `#[...]` or `#[...(name = \"...\")]`",
        )),
    }
}

/// Parses `#[injection(hooks)]`.
pub fn parse_injection_options(attr: &Attribute) -> SynResult<bool> {
    let mut hooks = false;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("hooks") {
            hooks = true;
            Ok(())
        } else {
            Err(meta.error("expects `#[injection(hooks)]`"))
        }
    })?;
    Ok(hooks)
}
