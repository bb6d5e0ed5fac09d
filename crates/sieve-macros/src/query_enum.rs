//! Implementation of the `#[derive(QueryEnum)]` macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Expr, ExprLit, Fields, Lit, Meta, Result};

use crate::entity::attrs::parse_container_attrs;

/// Main implementation of the QueryEnum derive macro.
pub fn query_enum_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let enum_name = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;
    if container.entity.is_some() {
        return Err(Error::new(
            input.ident.span(),
            "QueryEnum only accepts #[query(crate = \"...\")]",
        ));
    }
    let krate = container.crate_path();

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(Error::new(
                input.span(),
                "QueryEnum can only be derived for enums",
            ))
        }
    };

    let mut names: Vec<String> = Vec::new();
    let mut arms: Vec<TokenStream> = Vec::new();

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.span(),
                "QueryEnum variants cannot carry data",
            ));
        }

        let ident = &variant.ident;
        let name = variant_rename(variant)?.unwrap_or_else(|| ident.to_string());
        if names.contains(&name) {
            return Err(Error::new(
                variant.span(),
                format!("duplicate variant name '{name}'"),
            ));
        }

        arms.push(quote! { #enum_name::#ident => #name, });
        names.push(name);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::QueryEnum for #enum_name #ty_generics #where_clause {
            const VARIANTS: &'static [&'static str] = &[#(#names),*];

            fn variant_name(&self) -> &'static str {
                match *self {
                    #(#arms)*
                }
            }
        }
    })
}

/// Reads `#[query(rename = "...")]` on a variant.
fn variant_rename(variant: &syn::Variant) -> Result<Option<String>> {
    for attr in &variant.attrs {
        if !attr.path().is_ident("query") {
            continue;
        }
        let meta: Meta = attr.parse_args()?;
        return match meta {
            Meta::NameValue(nv) if nv.path.is_ident("rename") => match nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Ok(Some(s.value())),
                other => Err(Error::new(other.span(), "rename must be a string literal")),
            },
            other => Err(Error::new(
                other.span(),
                "unknown variant attribute. Expected: rename = \"...\"",
            )),
        };
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_variants_in_declaration_order() {
        let out = query_enum_derive_impl(parse_quote! {
            enum RuntimeStatus {
                Alive,
                #[query(rename = "SelfRestore")]
                Restoring,
                Dead,
            }
        })
        .unwrap()
        .to_string();
        let alive = out.find("\"Alive\"").unwrap();
        let restore = out.find("\"SelfRestore\"").unwrap();
        let dead = out.find("\"Dead\"").unwrap();
        assert!(alive < restore && restore < dead);
        assert!(!out.contains("\"Restoring\""));
    }

    #[test]
    fn test_crate_path_override() {
        let out = query_enum_derive_impl(parse_quote! {
            #[query(crate = "::sieve::query")]
            enum Kind { A }
        })
        .unwrap()
        .to_string();
        assert!(out.contains(":: sieve :: query :: QueryEnum for Kind"));

        let err = query_enum_derive_impl(parse_quote! {
            #[query(entity = "Kind")]
            enum Kind { A }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only accepts"));
    }

    #[test]
    fn test_rejects_data_variants() {
        let err = query_enum_derive_impl(parse_quote! {
            enum Kind { Named(String) }
        })
        .unwrap_err();
        assert!(err.to_string().contains("cannot carry data"));
    }

    #[test]
    fn test_rejects_structs() {
        let err = query_enum_derive_impl(parse_quote! {
            struct Kind;
        })
        .unwrap_err();
        assert!(err.to_string().contains("only be derived for enums"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = query_enum_derive_impl(parse_quote! {
            enum Kind {
                A,
                #[query(rename = "A")]
                B,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("duplicate variant name 'A'"));
    }
}
