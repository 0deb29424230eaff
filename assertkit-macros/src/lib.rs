//! Procedural macros for assertkit
//!
//! This crate provides `#[derive(Diffable)]`, which lowers a struct into
//! an `assertkit::value::Value` so it can be deep-diffed field by field.
//!
//! # Example
//!
//! ```rust,ignore
//! use assertkit::Diffable;
//!
//! #[derive(Diffable)]
//! pub struct Order {
//!     pub id: u64,
//!     pub items: Vec<String>,
//!     #[diff(skip)]
//!     cache: Option<String>,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Field, Fields, GenericParam, Index, LitStr,
    Visibility,
};

/// Per-field options from `#[diff(...)]`.
#[derive(Default)]
struct FieldOptions {
    skip: bool,
    rename: Option<String>,
}

impl FieldOptions {
    fn from_field(field: &Field) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("diff")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    options.rename = Some(name.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown diff option, expected `skip` or `rename = \"...\"`"))
                }
            })?;
        }
        Ok(options)
    }
}

/// Derive `assertkit::value::Diffable` for a struct.
///
/// Every field must itself implement `Diffable`. Fields are compared in
/// declaration order; tuple struct fields are named `0`, `1`, ...
///
/// # Field Options
///
/// - `#[diff(skip)]` - leave the field out of comparisons
/// - `#[diff(rename = "name")]` - report the field under another name
///
/// `pub` fields are exported; differences confined to private fields are
/// reported without their values.
///
/// ```rust,ignore
/// #[derive(Diffable)]
/// pub struct Pair<T>(pub T, pub T);
/// ```
#[proc_macro_derive(Diffable, attributes(diff))]
pub fn derive_diffable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_derive(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_derive(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Diffable can only be derived for structs, not enums",
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Diffable can only be derived for structs, not unions",
            ));
        }
    };

    let lowered = lower_fields(fields)?;

    for param in &mut input.generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::assertkit::value::Diffable));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::assertkit::value::Diffable for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::assertkit::value::Value {
                ::assertkit::value::Value::structure(
                    ::std::any::type_name::<Self>(),
                    ::std::vec![#(#lowered),*],
                )
            }
        }
    })
}

fn lower_fields(fields: &Fields) -> syn::Result<Vec<TokenStream2>> {
    let mut lowered = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let options = FieldOptions::from_field(field)?;
        if options.skip {
            continue;
        }

        let (access, default_name) = match &field.ident {
            Some(ident) => (quote!(#ident), ident.to_string()),
            None => {
                let index = Index::from(i);
                (quote!(#index), i.to_string())
            }
        };
        let reported = options.rename.unwrap_or(default_name);
        let exported = matches!(field.vis, Visibility::Public(_));

        lowered.push(quote! {
            ::assertkit::value::Field::new(
                #reported,
                #exported,
                ::assertkit::value::Diffable::to_value(&self.#access),
            )
        });
    }
    Ok(lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(source: &str) -> syn::Result<String> {
        let input: DeriveInput = syn::parse_str(source)?;
        expand_derive(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_named_struct() {
        let out = expand("pub struct User { pub name: String, age: u32 }").unwrap();
        assert!(out.contains("impl :: assertkit :: value :: Diffable for User"));
        assert!(out.contains("\"name\" , true"));
        assert!(out.contains("\"age\" , false"));
    }

    #[test]
    fn test_tuple_struct() {
        let out = expand("struct Pair(pub u8, u8);").unwrap();
        assert!(out.contains("\"0\" , true"));
        assert!(out.contains("self . 1"));
    }

    #[test]
    fn test_skip_and_rename() {
        let out = expand(
            "struct S { #[diff(skip)] cache: u8, #[diff(rename = \"ID\")] pub id: u64 }",
        )
        .unwrap();
        assert!(!out.contains("cache"));
        assert!(out.contains("\"ID\""));
    }

    #[test]
    fn test_generic_bound() {
        let out = expand("struct Wrapper<T> { pub inner: T }").unwrap();
        assert!(out.contains("impl < T : :: assertkit :: value :: Diffable >"));
    }

    #[test]
    fn test_unit_struct() {
        let out = expand("struct Marker;").unwrap();
        assert!(out.contains(":: std :: vec ! []"));
    }

    #[test]
    fn test_enum_rejected() {
        let err = expand("enum E { A, B }").unwrap_err();
        assert!(err.to_string().contains("not enums"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = expand("struct S { #[diff(ignore)] a: u8 }").unwrap_err();
        assert!(err.to_string().contains("unknown diff option"));
    }
}
