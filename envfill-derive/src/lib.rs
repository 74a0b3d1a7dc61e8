//! Derive macro implementation for envfill

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;
mod classify;

use attrs::FieldAttrs;
use classify::{classify, type_name, Classified};

/// `EnvFill` derive macro
///
/// Implements the `EnvFill` trait for structs with named fields, turning
/// `#[conf(...)]` annotations into a field walk the runtime can drive.
///
/// # Supported Attributes
///
/// - `#[conf(key = "VAR")]`: environment variable to read for this field
/// - `#[conf(default = "value")]`: raw string used when the variable is
///   not set
/// - `#[conf(required)]`: fail the load when no value is available
/// - `#[conf(nested)]`: recurse into a sub-struct, adding the field name
///   to the path
/// - `#[conf(flatten)]`: recurse into a sub-struct without a path segment
///
/// Fields without any `#[conf]` annotation (or with a blank key) are left
/// alone. A field carrying both a key and `nested`/`flatten` is a leaf:
/// the key wins.
///
/// # Example
///
/// See the `envfill` crate documentation for usage examples.
#[proc_macro_derive(EnvFill, attributes(conf))]
pub fn derive_envfill(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input).into()
}

/// Expand one derive input into the trait impl, or into a
/// `compile_error!` invocation when the target shape is rejected.
fn expand(input: DeriveInput) -> proc_macro2::TokenStream {
    let struct_name = &input.ident;

    // No struct-level annotations exist; reject them so a stray
    // #[conf(...)] on the struct is not silently ignored.
    for attr in &input.attrs {
        if attr.path().is_ident("conf") {
            return syn::Error::new_spanned(attr, "conf attributes belong on fields, not the struct")
                .to_compile_error();
        }
    }

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "EnvFill only supports structs with named fields",
                )
                .to_compile_error();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "EnvFill only supports structs")
                .to_compile_error();
        }
    };

    // Generate one walk step per participating field
    let steps = fields
        .iter()
        .filter_map(|field| {
            let attrs = match FieldAttrs::from_field(field) {
                Ok(attrs) => attrs,
                Err(err) => return Some(err.to_compile_error()),
            };
            field_step(field, &attrs)
        })
        .collect::<Vec<_>>();

    // Leave the parameters unnamed when nothing uses them so structs with
    // no participating fields expand without warnings.
    let (prefix_arg, visitor_arg) = if steps.is_empty() {
        (quote! { _prefix }, quote! { _visitor })
    } else {
        (quote! { prefix }, quote! { visitor })
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics ::envfill::EnvFill for #struct_name #ty_generics #where_clause {
            fn walk_fields(
                &mut self,
                #prefix_arg: &str,
                #visitor_arg: &mut ::envfill::Visitor<'_>,
            ) -> ::core::result::Result<(), ::envfill::Error> {
                #(#steps)*
                ::core::result::Result::Ok(())
            }
        }
    }
}

/// Generate the walk step for one field, or `None` when it is skipped.
fn field_step(field: &syn::Field, attrs: &FieldAttrs) -> Option<proc_macro2::TokenStream> {
    let field_name = field.ident.as_ref().unwrap();
    let path_segment = field_name.to_string();

    // A key makes the field a leaf, even when nested/flatten is also set.
    if let Some(key) = attrs.participation_key() {
        let default_tokens = match attrs.default.as_deref() {
            Some(value) => quote! { ::core::option::Option::Some(#value) },
            None => quote! { ::core::option::Option::None },
        };
        let required = attrs.required;
        let expected = type_name(&field.ty);
        let slot = match classify(&field.ty) {
            Classified::Supported => quote! {
                ::envfill::Slot::value(#expected, &mut self.#field_name)
            },
            Classified::Unsupported => quote! {
                ::envfill::Slot::unsupported(#expected)
            },
        };
        return Some(quote! {
            visitor(::envfill::Field::new(
                #key,
                #default_tokens,
                #required,
                ::envfill::join_path(prefix, #path_segment),
                #slot,
            ))?;
        });
    }

    if attrs.nested {
        return Some(quote! {
            ::envfill::EnvFill::walk_fields(
                &mut self.#field_name,
                &::envfill::join_path(prefix, #path_segment),
                visitor,
            )?;
        });
    }

    if attrs.flatten {
        return Some(quote! {
            ::envfill::EnvFill::walk_fields(&mut self.#field_name, prefix, visitor)?;
        });
    }

    None
}
