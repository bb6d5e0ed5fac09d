//! Implementation of the `#[derive(Entity)]` macro.
//!
//! Generates the entity's field registry, the typed field accessor and field
//! name constants from struct annotations.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_container_attrs, parse_field_attrs, QueryType};

/// Main implementation of the Entity derive macro.
pub fn entity_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;
    let krate = container.crate_path();
    let entity_name = container
        .entity
        .unwrap_or_else(|| struct_name.to_string());

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Entity can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Entity can only be derived for structs",
            ))
        }
    };

    let mut registry_fields: Vec<TokenStream> = Vec::new();
    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut key_count = 0usize;
    let mut parent_count = 0usize;

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_field_attrs(&field.attrs)?;

        if attrs.skip {
            continue;
        }

        let query_type = match attrs.query_type {
            Some(t) => t,
            None if attrs.has_flags() => {
                return Err(Error::new(
                    field.span(),
                    format!("field '{field_name}' needs a query type, e.g. #[query(String, ...)]"),
                ))
            }
            None => continue,
        };

        let query_name = attrs
            .rename
            .clone()
            .unwrap_or_else(|| to_pascal_case(&field_name.to_string()));

        if !seen.insert(query_name.clone()) {
            return Err(Error::new(
                field.span(),
                format!("duplicate query field name '{query_name}'"),
            ));
        }

        let inner = option_inner(&field.ty);
        let nullable = inner.is_some();

        // Registry entry
        let value_type = format_ident!("{}", query_type.variant_name());
        let mut entry = quote! {
            #krate::Field::new(#query_name, #krate::ValueType::#value_type)
        };
        if nullable {
            entry = quote! { #entry.nullable() };
        }
        if attrs.key {
            key_count += 1;
            entry = quote! { #entry.key() };
        }
        if attrs.parent {
            parent_count += 1;
            if parent_count > 1 {
                return Err(Error::new(
                    field.span(),
                    "only one field can be marked as parent",
                ));
            }
            entry = quote! { #entry.parent() };
        }
        if attrs.searchable {
            entry = quote! { #entry.searchable() };
        }
        if query_type == QueryType::Enum {
            let enum_ty = inner.unwrap_or(&field.ty);
            entry = quote! {
                #entry.with_variants(<#enum_ty as #krate::QueryEnum>::VARIANTS)
            };
        }
        registry_fields.push(quote! { .field(#entry) });

        // Accessor
        let value_expr = match (query_type, nullable) {
            (QueryType::Enum, false) => quote! {
                #krate::Value::Enum(
                    #krate::QueryEnum::variant_name(&self.#field_name)
                )
            },
            (QueryType::Enum, true) => quote! {
                match &self.#field_name {
                    ::std::option::Option::Some(v) => #krate::Value::Enum(
                        #krate::QueryEnum::variant_name(v)
                    ),
                    ::std::option::Option::None => #krate::Value::Null,
                }
            },
            _ => quote! { #krate::AsValue::as_value(&self.#field_name) },
        };
        field_matches.push(quote! {
            #query_name => #value_expr,
        });

        // Constant
        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        field_constants.push(quote! {
            /// Field name constant for type-safe queries.
            pub const #const_name: &'static str = #query_name;
        });
    }

    if key_count == 0 {
        return Err(Error::new(
            input.ident.span(),
            "Entity needs at least one field marked #[query(..., key)]",
        ));
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics #krate::Entity for #struct_name #ty_generics #where_clause {
            fn registry() -> &'static #krate::FieldRegistry {
                static REGISTRY: ::std::sync::OnceLock<#krate::FieldRegistry> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    #krate::FieldRegistry::builder(#entity_name)
                        #(#registry_fields)*
                        .build()
                })
            }

            fn field_value(&self, field: &str) -> #krate::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => #krate::Value::Null,
                }
            }
        }
    };

    Ok(expanded)
}

/// Returns `T` if `ty` is `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Convert a snake_case identifier to PascalCase.
fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut upper_next = true;

    for c in s.trim_start_matches("r#").chars() {
        if c == '_' || c == '-' {
            upper_next = true;
        } else if upper_next {
            result.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
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
