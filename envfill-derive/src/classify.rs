//! Syntactic classification of field types.
//!
//! The runtime can only convert a closed set of types. The derive decides
//! membership by looking at the written type, so aliases and fully
//! qualified paths are judged by their last segment: `std::time::Duration`
//! and `Duration` are both convertible, a user alias like `type Port = u16`
//! is not recognized.

use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Whether a field type is inside the convertible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    /// The runtime can convert raw strings into this type.
    Supported,
    /// Looking the key up will fail the load with an unsupported-type
    /// error; the field still participates so the mistake is loud.
    Unsupported,
}

pub fn classify(ty: &Type) -> Classified {
    if is_scalar(ty) {
        return Classified::Supported;
    }
    if let Some(element) = vec_element(ty) {
        if is_scalar(element) {
            return Classified::Supported;
        }
    }
    Classified::Unsupported
}

/// Render the type the way a user would write it, for error messages.
///
/// Token streams print with spaces around punctuation (`Vec < u8 >`), so
/// the common separators are tightened back up.
pub fn type_name(ty: &Type) -> String {
    let raw = quote::quote!(#ty).to_string();
    raw.replace(" :: ", "::")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace("> ", ">")
        .replace(" ,", ",")
        .replace("( ", "(")
        .replace(" )", ")")
        .replace("& ", "&")
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(TypePath { qself: None, path }) => path.segments.last(),
        _ => None,
    }
}

fn is_scalar(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| {
        segment.arguments.is_none()
            && matches!(
                segment.ident.to_string().as_str(),
                "String"
                    | "bool"
                    | "i8"
                    | "i16"
                    | "i32"
                    | "i64"
                    | "i128"
                    | "isize"
                    | "u8"
                    | "u16"
                    | "u32"
                    | "u64"
                    | "u128"
                    | "usize"
                    | "f32"
                    | "f64"
                    | "Duration"
            )
    })
}

fn vec_element(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Vec" {
        return None;
    }
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        if let Some(GenericArgument::Type(inner)) = args.args.first() {
            return Some(inner);
        }
    }
    None
}
