//! typeschema-macros - Procedural macros for typeschema
//!
//! This crate provides `#[derive(Describe)]`, which implements
//! `typeschema::Describe` for structs with named fields (as beans) and for
//! unit-only enums (as enumerations).

use darling::ast::Data;
use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, LitStr, parse_macro_input};

/// Options for the Describe derive macro
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(schema), supports(struct_named, enum_unit))]
struct DescribeOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: Data<VariantOpts, FieldOpts>,

    /// Fully-qualified display name (default: `module_path!()::Ident`)
    #[darling(default)]
    name: Option<String>,

    /// Class-level schema override, a JSON object literal
    #[darling(default)]
    schema: Option<LitStr>,

    /// Example value as JSON text
    #[darling(default)]
    example: Option<LitStr>,

    /// Type whose descriptor replaces this one for classification
    #[darling(default)]
    swap: Option<syn::Type>,
}

#[derive(Debug, FromField)]
#[darling(attributes(schema))]
struct FieldOpts {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    skip: bool,

    /// Comma-separated names of nested properties to keep
    #[darling(default)]
    filter: Option<String>,

    #[darling(default)]
    schema: Option<LitStr>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(schema))]
struct VariantOpts {
    ident: syn::Ident,

    /// Display string of the constant
    #[darling(default)]
    rename: Option<String>,
}

/// Derive macro for self-describing types
///
/// # Example
///
/// ```ignore
/// #[derive(Describe)]
/// #[schema(schema = r#"{"description": "A registered user"}"#)]
/// struct User {
///     id: i64,
///     #[schema(rename = "displayName")]
///     name: String,
///     #[schema(filter = "street,city")]
///     address: Address,
///     #[schema(skip)]
///     password_hash: String,
/// }
///
/// #[derive(Describe)]
/// enum Status {
///     #[schema(rename = "active")]
///     Active,
///     Suspended,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(schema))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(e) => TokenStream::from(e.write_errors()),
    }
}

fn expand(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let opts = DescribeOpts::from_derive_input(input)?;
    let name = &opts.ident;

    let mut generics = opts.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(::typeschema::Describe));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let display_name = match &opts.name {
        Some(explicit) => quote!(#explicit),
        None => quote!(concat!(module_path!(), "::", stringify!(#name))),
    };

    let body = match &opts.data {
        Data::Struct(fields) => {
            let properties = fields
                .iter()
                .filter(|f| !f.skip)
                .map(expand_property)
                .collect::<darling::Result<Vec<_>>>()?;
            quote! {
                ::typeschema::TypeDescriptor::bean(#display_name, vec![#(#properties),*])
            }
        }
        Data::Enum(variants) => {
            let constants = variants.iter().map(expand_constant);
            quote! {
                ::typeschema::TypeDescriptor::enumeration(#display_name, vec![#(#constants),*])
            }
        }
    };

    let params: Vec<&syn::Ident> = opts.generics.type_params().map(|p| &p.ident).collect();
    let arguments = if params.is_empty() {
        quote!()
    } else {
        quote! {
            let descriptor = descriptor.with_type_arguments(&[
                #(<#params as ::typeschema::Describe>::descriptor()),*
            ]);
        }
    };

    let schema = match &opts.schema {
        Some(lit) => {
            validate_json_object(lit)?;
            quote! {
                let descriptor = descriptor.with_schema(
                    ::typeschema::__private::schema_override(#lit)
                );
            }
        }
        None => quote!(),
    };

    let example = match &opts.example {
        Some(lit) => {
            validate_json(lit)?;
            quote! {
                let descriptor = descriptor.with_example(::typeschema::Example::json(#lit));
            }
        }
        None => quote!(),
    };

    let swap = match &opts.swap {
        Some(target) => quote! {
            let descriptor = descriptor.with_swap(
                ::typeschema::Swap::new(::typeschema::TypeRef::of::<#target>())
            );
        },
        None => quote!(),
    };

    Ok(quote! {
        impl #impl_generics ::typeschema::Describe for #name #ty_generics #where_clause {
            fn descriptor() -> ::typeschema::TypeDescriptor {
                let descriptor = #body;
                #arguments
                #schema
                #example
                #swap
                descriptor
            }
        }
    })
}

fn expand_property(field: &FieldOpts) -> darling::Result<TokenStream2> {
    let ty = &field.ty;
    let property_name = match (&field.rename, &field.ident) {
        (Some(rename), _) => rename.clone(),
        (None, Some(ident)) => unraw(ident),
        (None, None) => return Err(darling::Error::unsupported_shape("tuple field")),
    };

    let mut tokens = quote! {
        ::typeschema::PropertyDescriptor::new(#property_name, ::typeschema::TypeRef::of::<#ty>())
    };

    if let Some(filter) = &field.filter {
        let names = split_filter(filter);
        tokens = quote!(#tokens.with_filter([#(#names),*]));
    }

    if let Some(lit) = &field.schema {
        validate_json_object(lit)?;
        tokens = quote!(#tokens.with_schema(::typeschema::__private::schema_override(#lit)));
    }

    Ok(tokens)
}

fn expand_constant(variant: &VariantOpts) -> TokenStream2 {
    let constant_name = variant.ident.to_string();
    let display = variant.rename.clone().unwrap_or_else(|| constant_name.clone());
    quote! {
        ::typeschema::EnumConstant::new(#constant_name).with_display(#display)
    }
}

/// Reject string literals that are not valid JSON
fn validate_json(lit: &LitStr) -> darling::Result<serde_json::Value> {
    serde_json::from_str(&lit.value())
        .map_err(|e| darling::Error::custom(format!("invalid JSON: {e}")).with_span(lit))
}

/// Reject string literals that are not a JSON object
fn validate_json_object(lit: &LitStr) -> darling::Result<()> {
    match validate_json(lit)? {
        serde_json::Value::Object(_) => Ok(()),
        _ => Err(darling::Error::custom("schema must be a JSON object").with_span(lit)),
    }
}

/// Split `"a, b,,c"` into `["a", "b", "c"]`
fn split_filter(filter: &str) -> Vec<String> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Field name without a raw identifier prefix (`r#type` -> `type`)
fn unraw(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(String::from).unwrap_or(name)
}
