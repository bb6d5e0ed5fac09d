//! Attribute parsing for the Entity derive macro.
//!
//! Parses the container attribute `#[query(entity = "...", crate = "...")]`
//! and the field attributes `#[query(Type, key, parent, searchable, rename = "...")]`.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Ident, Lit, Meta, Path, Result, Token,
};

const TYPE_NAMES: &str = "Guid, String, Integer, Long, Boolean, DateTime, Enum, StringList";

/// The declared value type of a queryable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Guid,
    String,
    Integer,
    Long,
    Boolean,
    DateTime,
    Enum,
    StringList,
}

impl QueryType {
    /// Parse a query type from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        Self::from_str(&ident.to_string(), ident.span())
    }

    /// Parse a query type from its name. Lowercase aliases cover names that
    /// are keywords (`ty = "enum"`).
    pub fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "Guid" | "guid" | "Uuid" => Ok(QueryType::Guid),
            "String" | "string" => Ok(QueryType::String),
            "Integer" | "integer" | "Int" => Ok(QueryType::Integer),
            "Long" | "long" => Ok(QueryType::Long),
            "Boolean" | "boolean" | "Bool" => Ok(QueryType::Boolean),
            "DateTime" | "datetime" => Ok(QueryType::DateTime),
            "Enum" | "enum" | "enumeration" => Ok(QueryType::Enum),
            "StringList" | "string_list" => Ok(QueryType::StringList),
            other => Err(Error::new(
                span,
                format!("unknown query type: '{other}'. Expected one of: {TYPE_NAMES}"),
            )),
        }
    }

    /// Name of the matching `ValueType` variant.
    pub fn variant_name(self) -> &'static str {
        match self {
            QueryType::Guid => "Guid",
            QueryType::String => "String",
            QueryType::Integer => "Integer",
            QueryType::Long => "Long",
            QueryType::Boolean => "Boolean",
            QueryType::DateTime => "DateTime",
            QueryType::Enum => "Enum",
            QueryType::StringList => "StringList",
        }
    }
}

/// Field-level attributes from `#[query(...)]`.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    pub query_type: Option<QueryType>,
    pub skip: bool,
    pub key: bool,
    pub parent: bool,
    pub searchable: bool,
    /// Transport name override (default: PascalCase of the field name).
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            query_type: None,
            skip: false,
            key: false,
            parent: false,
            searchable: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl FieldAttr {
    /// Returns `true` if any flag other than the type was given.
    pub fn has_flags(&self) -> bool {
        self.key || self.parent || self.searchable || self.rename.is_some()
    }
}

fn string_value(expr: &Expr, what: &str) -> Result<(String, Span)> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok((s.value(), s.span())),
        _ => Err(Error::new(
            expr.span(),
            format!("{what} must be a string literal"),
        )),
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("key") {
                        attr.key = true;
                    } else if p.is_ident("parent") {
                        attr.parent = true;
                    } else if p.is_ident("searchable") {
                        attr.searchable = true;
                    } else if let Some(ident) = p.get_ident() {
                        if attr.query_type.is_some() {
                            return Err(Error::new(ident.span(), "query type given twice"));
                        }
                        attr.query_type = Some(QueryType::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            format!("expected a query type ({TYPE_NAMES}) or a flag"),
                        ));
                    }
                }

                Meta::NameValue(nv) => {
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(string_value(&nv.value, "rename")?.0);
                    } else if nv.path.is_ident("ty") {
                        let (name, span) = string_value(&nv.value, "ty")?;
                        attr.query_type = Some(QueryType::from_str(&name, span)?);
                        attr.span = span;
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or ty",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown query attribute. Expected: a type, key, parent, searchable, skip, rename = \"...\", or ty = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[query(...)]` attributes from a field's attributes.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    for attr in attrs {
        if attr.path().is_ident("query") {
            return attr.parse_args::<FieldAttr>();
        }
    }
    Ok(FieldAttr::default())
}

/// Container-level attributes from `#[query(entity = "...")]`.
#[derive(Clone, Default)]
pub struct ContainerAttr {
    pub entity: Option<String>,
    /// Path to the `sieve-query` crate in generated code.
    pub krate: Option<Path>,
}

impl ContainerAttr {
    /// The crate path, defaulting to `::sieve_query`.
    pub fn crate_path(&self) -> Path {
        self.krate
            .clone()
            .unwrap_or_else(|| syn::parse_quote!(::sieve_query))
    }
}

impl Parse for ContainerAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ContainerAttr::default();
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("entity") => {
                    attr.entity = Some(string_value(&nv.value, "entity")?.0);
                }
                Meta::NameValue(nv) if nv.path.is_ident("crate") => {
                    let (path, span) = string_value(&nv.value, "crate")?;
                    let path = syn::parse_str::<Path>(&path)
                        .map_err(|_| Error::new(span, format!("'{path}' is not a valid path")))?;
                    attr.krate = Some(path);
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown container attribute. Expected: entity = \"...\" or crate = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract the `#[query(...)]` container attribute, if present.
pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttr> {
    for attr in attrs {
        if attr.path().is_ident("query") {
            return attr.parse_args::<ContainerAttr>();
        }
    }
    Ok(ContainerAttr::default())
}
