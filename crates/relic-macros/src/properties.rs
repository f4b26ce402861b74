//! `#[derive(Properties)]` implementation.
//!
//! # Field-level attributes `#[property(...)]`
//!
//! | Key | Example | Description |
//! |-----|---------|-------------|
//! | *(bare)* | `#[property]` | Declares the field with the default order |
//! | `order` | `order = 1` | Sort key of the property (default `i32::MAX`) |
//! | `required` | `required` | Explicitly required; every earlier property becomes required too |
//! | `name` | `name = "costAoe"` | Property name (default: the field name) |
//! | `accepted` | `accepted(values = ["A"], preset = PotionEffectType)` | Accepted values |
//! | `parent` | `parent` | The field embeds the parent type's value |
//!
//! Fields without the attribute are not properties. Every declared field
//! type must implement `serde::Serialize`; the generated accessor serializes
//! the current value of the field.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit, LitStr, spanned::Spanned};

// ============================================================================
// Attribute structures
// ============================================================================

#[derive(Default)]
struct FieldAttrs {
    declared: bool,
    is_parent: bool,
    order: Option<syn::LitInt>,
    required: bool,
    name: Option<LitStr>,
    accepted_values: Vec<LitStr>,
    preset: Option<Ident>,
    has_accepted: bool,
}

// ============================================================================
// Entry point
// ============================================================================

pub fn derive_properties(input: &DeriveInput) -> syn::Result<TokenStream> {
    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    input.span(),
                    "Properties requires a struct with named fields or a unit struct",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "Properties can only be derived for structs",
            ));
        }
    };

    let mut declarations = Vec::new();
    let mut parent_field: Option<Ident> = None;

    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        if attrs.is_parent {
            if parent_field.is_some() {
                return Err(syn::Error::new(
                    field.span(),
                    "only one field can be marked #[property(parent)]",
                ));
            }
            parent_field = Some(ident.clone());
            continue;
        }

        if attrs.declared {
            declarations.push(generate_declaration(ident, &attrs));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let project_impl = parent_field.map(|parent| {
        quote! {
            fn project_parent(
                holder: &dyn ::std::any::Any,
            ) -> ::std::option::Option<&dyn ::std::any::Any> {
                holder
                    .downcast_ref::<Self>()
                    .map(|this| &this.#parent as &dyn ::std::any::Any)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::relic_core::DeclareProperties for #name #ty_generics #where_clause {
            fn declared_properties() -> ::std::vec::Vec<::relic_core::PropertyDecl> {
                ::std::vec![#(#declarations),*]
            }

            #project_impl
        }
    })
}

// ============================================================================
// Attribute parsing
// ============================================================================

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("property") {
            continue;
        }
        result.declared = true;

        // A bare `#[property]` has no nested meta to parse.
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("parent") {
                result.is_parent = true;
            } else if meta.path.is_ident("required") {
                result.required = true;
            } else if meta.path.is_ident("order") {
                result.order = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("name") {
                result.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("accepted") {
                result.has_accepted = true;
                meta.parse_nested_meta(|inner| {
                    if inner.path.is_ident("values") {
                        let array: syn::ExprArray = inner.value()?.parse()?;
                        for element in array.elems {
                            match element {
                                Expr::Lit(ExprLit {
                                    lit: Lit::Str(lit), ..
                                }) => result.accepted_values.push(lit),
                                other => {
                                    return Err(syn::Error::new(
                                        other.span(),
                                        "accepted values must be string literals",
                                    ));
                                }
                            }
                        }
                        Ok(())
                    } else if inner.path.is_ident("preset") {
                        result.preset = Some(inner.value()?.parse()?);
                        Ok(())
                    } else {
                        Err(inner.error("expected `values` or `preset`"))
                    }
                })?;
            } else {
                return Err(meta.error("unknown property attribute"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

// ============================================================================
// Code generation
// ============================================================================

fn generate_declaration(field: &Ident, attrs: &FieldAttrs) -> TokenStream {
    let property_name = attrs
        .name
        .clone()
        .unwrap_or_else(|| LitStr::new(&field.to_string(), field.span()));

    let order = attrs.order.as_ref().map(|order| quote! { .with_order(#order) });
    let required = attrs.required.then(|| quote! { .with_required(true) });
    let accepted = attrs.has_accepted.then(|| {
        let values = &attrs.accepted_values;
        let preset = attrs
            .preset
            .clone()
            .unwrap_or_else(|| Ident::new("None", field.span()));
        quote! {
            .with_accepted(::relic_core::AcceptedValues::new(
                &[#(#values),*],
                ::relic_core::Preset::#preset,
            ))
        }
    });

    quote! {
        ::relic_core::PropertyDecl::new(#property_name)
            #order
            #required
            #accepted
            .with_accessor(|holder: &dyn ::std::any::Any| {
                holder
                    .downcast_ref::<Self>()
                    .and_then(|this| ::relic_core::__private::serde_json::to_value(&this.#field).ok())
            })
    }
}
