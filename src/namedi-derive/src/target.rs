use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error as SynError, Fields, Generics, Ident, LitStr, Result as SynResult};

use crate::attrs;

#[derive(Debug)]
pub struct TargetData {
    identifier: Ident,
    generics: Generics,
    points: Vec<PointData>,
    hooks: bool,
}

#[derive(Debug)]
struct PointData {
    field: Ident,
    name: LitStr,
}

pub fn parse_target(input: DeriveInput) -> SynResult<TargetData> {
    let Data::Struct(data) = &input.data else {
        return Err(SynError::new(
            input.span(),
            "`#[derive(InjectionTarget)]` only supports structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(SynError::new(
            data.fields.span(),
            "`#[derive(InjectionTarget)]` requires named fields",
        ));
    };

    let mut points = Vec::new();
    for field in &fields.named {
        let Some(identifier) = field.ident.clone() else {
            unreachable!("named fields should have identifiers");
        };
        let mut inject = None;
        for attr in field.attrs.iter().filter(|a| attrs::is_attribute(a, "inject")) {
            if inject.is_some() {
                return Err(SynError::new(
                    attr.path().span(),
                    "only one `#[inject]` attribute is allowed on a field",
                ));
            }
            inject = Some(attrs::parse_optional_name(attr)?);
        }
        if let Some(name) = inject {
            let name = name.unwrap_or_else(|| {
                LitStr::new(&identifier.to_string(), identifier.span())
            });
            points.push(PointData {
                field: identifier,
                name,
            });
        }
    }

    let mut hooks = false;
    for attr in input.attrs.iter().filter(|a| attrs::is_attribute(a, "injection")) {
        hooks |= attrs::parse_injection_options(attr)?;
    }

    Ok(TargetData {
        identifier: input.ident,
        generics: input.generics,
        points,
        hooks,
    })
}

pub fn expand_injection_target(data: TargetData) -> TokenStream2 {
    let identifier = &data.identifier;
    let (impl_generics, type_generics, where_clause) = data.generics.split_for_impl();

    let points = data.points.iter().map(|point| {
        let PointData { field, name } = point;
        quote! { namedi::target::InjectionPoint::new(#name, &mut self.#field), }
    });

    let (hook, forwarded) = if data.hooks {
        let hook = quote! {
            fn hook(name: &str) -> std::option::Option<namedi::target::Hook<Self>> {
                <Self as namedi::target::LifecycleHooks>::hook(name)
            }
        };
        let forwarded = quote! {
            impl #impl_generics namedi::target::HooksForwarded for #identifier #type_generics
            #where_clause
            {}
        };
        (hook, forwarded)
    } else {
        (quote! {}, quote! {})
    };

    quote! {
        impl #impl_generics namedi::target::InjectionTarget for #identifier #type_generics
        #where_clause
        {
            fn injection_points(&mut self) -> std::vec::Vec<namedi::target::InjectionPoint<'_>> {
                std::vec![#(#points)*]
            }

            #hook
        }

        #forwarded
    }
}
