//! Implementation of the `#[derive(Inspect)]` macro.
//!
//! This macro generates implementations of the `Inspect` and `ToValue`
//! traits plus field name constants for building field paths.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_inspect_attrs;

/// Main implementation of the Inspect derive macro.
pub fn inspect_derive_impl(mut input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let record_name = struct_name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Inspect can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Inspect can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut record_fields: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let inspect_attrs = parse_inspect_attrs(&field.attrs)?;
        if inspect_attrs.skip {
            continue;
        }

        let path_name = inspect_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&path_name));

        field_constants.push(quote! {
            /// Field name constant for field paths.
            pub const #const_name: &'static str = #path_name;
        });

        field_matches.push(quote! {
            #path_name => ::core::option::Option::Some(
                ::std::borrow::Cow::Owned(::condmap::ToValue::to_value(&self.#field_name))
            ),
        });

        record_fields.push(quote! {
            .with_field(#path_name, ::condmap::ToValue::to_value(&self.#field_name))
        });
    }

    let type_params: Vec<_> = input
        .generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = input.generics.make_where_clause();
    for param in type_params {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::condmap::ToValue));
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::condmap::ToValue for #struct_name #ty_generics #where_clause {
            fn to_value(&self) -> ::condmap::Value {
                ::condmap::Value::Record(
                    ::condmap::Record::new(#record_name)
                        #(#record_fields)*
                )
            }
        }

        impl #impl_generics ::condmap::Inspect for #struct_name #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<::std::borrow::Cow<'_, ::condmap::Value>> {
                match name {
                    #(#field_matches)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
