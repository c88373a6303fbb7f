use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Error as SynError, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat,
    Result as SynResult, Signature,
};

use crate::attrs;

#[derive(Debug)]
struct HookData {
    method: Ident,
    name: LitStr,
    parameters: Vec<LitStr>,
}

pub fn expand_lifecycle(mut impls: ItemImpl) -> SynResult<TokenStream2> {
    if let Some((_, path, _)) = &impls.trait_ {
        return Err(SynError::new(
            path.span(),
            "`#[lifecycle]` should be annotated on an inherent `impl` block",
        ));
    }

    let mut hooks = Vec::new();
    for item in impls.items.iter_mut() {
        if let ImplItem::Fn(method) = item {
            if let Some(hook) = take_hook(method)? {
                hooks.push(hook);
            }
        }
    }

    if hooks.is_empty() {
        return Err(SynError::new(
            impls.impl_token.span,
            "no method is annotated with `#[hook]`",
        ));
    }

    let self_type = &impls.self_ty;
    let (impl_generics, _, where_clause) = impls.generics.split_for_impl();

    let arms = hooks.iter().map(|hook| {
        let HookData {
            method,
            name,
            parameters,
        } = hook;
        let count = parameters.len();
        quote! {
            #name => {
                let names: [&'static str; #count] = [#(#parameters),*];
                namedi::provider::Injectable::method(names, Self::#method).ok()
            }
        }
    });

    Ok(quote! {
        #impls

        impl #impl_generics namedi::target::LifecycleHooks for #self_type #where_clause {
            fn hook(name: &str) -> std::option::Option<namedi::target::Hook<Self>> {
                match name {
                    #(#arms)*
                    _ => std::option::Option::None,
                }
            }
        }
    })
}

fn take_hook(method: &mut ImplItemFn) -> SynResult<Option<HookData>> {
    let mut custom_name = None;
    let mut annotated = false;

    for attr in method.attrs.iter().filter(|a| attrs::is_attribute(a, "hook")) {
        if annotated {
            return Err(SynError::new(
                attr.path().span(),
                "only one `#[hook]` attribute is allowed on a method",
            ));
        }
        annotated = true;
        custom_name = attrs::parse_optional_name(attr)?;
    }

    if !annotated {
        return Ok(None);
    }
    method.attrs.retain(|a| !attrs::is_attribute(a, "hook"));

    let signature = &method.sig;
    check_receiver(signature)?;
    let parameters = parse_parameters(signature)?;
    let name = custom_name
        .unwrap_or_else(|| LitStr::new(&signature.ident.to_string(), signature.ident.span()));

    Ok(Some(HookData {
        method: signature.ident.clone(),
        name,
        parameters,
    }))
}

fn check_receiver(signature: &Signature) -> SynResult<()> {
    match signature.receiver() {
        Some(receiver) if receiver.reference.is_some() && receiver.mutability.is_some() => Ok(()),
        Some(receiver) => Err(SynError::new(
            receiver.span(),
            "a hook should take `&mut self` as its receiver",
        )),
        None => Err(SynError::new(
            signature.span(),
            "a hook should be a method taking `&mut self`",
        )),
    }
}

fn parse_parameters(signature: &Signature) -> SynResult<Vec<LitStr>> {
    signature
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(arg) => Some(arg),
            FnArg::Receiver(_) => None,
        })
        .map(|arg| match arg.pat.as_ref() {
            Pat::Ident(pat) => {
                let name = pat.ident.to_string();
                let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
                Ok(LitStr::new(&name, pat.ident.span()))
            }
            pat => Err(SynError::new(
                pat.span(),
                "hook parameters should be plain identifiers naming their injections",
            )),
        })
        .collect()
}
