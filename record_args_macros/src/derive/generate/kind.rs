//! Mapping from Rust field types to `TypeKind` expressions.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, LitStr, PathArguments, Type};

/// Standard containers that map onto compound kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Container<'a> {
    /// `Option<T>`.
    Optional(&'a Type),
    /// `Vec<T>`.
    Sequence(&'a Type),
    /// `BTreeMap<K, V>` or `HashMap<K, V>`.
    Mapping(&'a Type, &'a Type),
}

/// Recognise `ty` as a container by its final path segment and type
/// arguments.
///
/// Module prefixes are ignored, so `std::collections::HashMap<K, V>` and
/// `HashMap<K, V>` classify alike. Only the outermost layer is inspected.
pub(crate) fn container_of(ty: &Type) -> Option<Container<'_>> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    let PathArguments::AngleBracketed(generics) = &last.arguments else {
        return None;
    };
    let params: Vec<&Type> = generics
        .args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(param) => Some(param),
            _ => None,
        })
        .collect();
    match (last.ident.to_string().as_str(), params.as_slice()) {
        ("Option", &[inner]) => Some(Container::Optional(inner)),
        ("Vec", &[element]) => Some(Container::Sequence(element)),
        ("BTreeMap" | "HashMap", &[key, value]) => Some(Container::Mapping(key, value)),
        _ => None,
    }
}

/// Inner type of an `Option<T>` field.
pub(crate) fn optional_inner(ty: &Type) -> Option<&Type> {
    match container_of(ty)? {
        Container::Optional(inner) => Some(inner),
        Container::Sequence(_) | Container::Mapping(..) => None,
    }
}

/// Scalar kinds a field type can map to directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scalar {
    Int,
    Float,
    Bool,
    Str,
}

impl Scalar {
    fn tokens(self, krate: &TokenStream) -> TokenStream {
        match self {
            Self::Int => quote! { #krate::schema::ScalarKind::Int },
            Self::Float => quote! { #krate::schema::ScalarKind::Float },
            Self::Bool => quote! { #krate::schema::ScalarKind::Bool },
            Self::Str => quote! { #krate::schema::ScalarKind::Str },
        }
    }
}

/// Classify `ty` as a scalar by the last path segment.
///
/// Only bare segments count, so `Vec<u8>` or a user type named `Int` are not
/// scalars.
pub(crate) fn scalar_of(ty: &Type) -> Option<Scalar> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if !last.arguments.is_none() {
        return None;
    }
    match last.ident.to_string().as_str() {
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => Some(Scalar::Int),
        "f32" | "f64" => Some(Scalar::Float),
        "bool" => Some(Scalar::Bool),
        "String" | "PathBuf" | "Utf8PathBuf" | "char" => Some(Scalar::Str),
        _ => None,
    }
}

/// Build the `TypeKind` expression describing `ty`.
///
/// Types that are not scalars or recognised containers are treated as
/// nested records and must implement `Record`.
pub(crate) fn kind_tokens(ty: &Type, krate: &TokenStream) -> syn::Result<TokenStream> {
    match container_of(ty) {
        Some(Container::Optional(inner)) => {
            let inner_kind = kind_tokens(inner, krate)?;
            return Ok(quote! { #krate::schema::TypeKind::optional(#inner_kind) });
        }
        Some(Container::Sequence(element)) => {
            let element_kind = kind_tokens(element, krate)?;
            return Ok(quote! { #krate::schema::TypeKind::list(#element_kind) });
        }
        Some(Container::Mapping(key, value)) => {
            let Some(key_scalar) = scalar_of(key) else {
                return Err(syn::Error::new_spanned(
                    key,
                    "mapping keys must be integers, floats, booleans or strings",
                ));
            };
            let key_kind = key_scalar.tokens(krate);
            let value_kind = kind_tokens(value, krate)?;
            return Ok(quote! { #krate::schema::TypeKind::map(#key_kind, #value_kind) });
        }
        None => {}
    }
    match ty {
        Type::Paren(inner) => kind_tokens(&inner.elem, krate),
        Type::Group(inner) => kind_tokens(&inner.elem, krate),
        Type::Tuple(tuple) if !tuple.elems.is_empty() => {
            let elements = tuple
                .elems
                .iter()
                .map(|elem| kind_tokens(elem, krate))
                .collect::<syn::Result<Vec<_>>>()?;
            Ok(quote! { #krate::schema::TypeKind::tuple([#(#elements),*]) })
        }
        Type::Path(path) if path.qself.is_none() => Ok(scalar_of(ty).map_or_else(
            || quote! { #krate::schema::TypeKind::record(<#ty as #krate::Record>::schema()) },
            |scalar| {
                let scalar_kind = scalar.tokens(krate);
                quote! { #krate::schema::TypeKind::Scalar(#scalar_kind) }
            },
        )),
        other => Err(syn::Error::new_spanned(
            other,
            "unsupported field type for Record",
        )),
    }
}

/// Build a choice kind for a `String` or `Option<String>` field.
pub(crate) fn choice_tokens(
    ty: &Type,
    choices: &[LitStr],
    krate: &TokenStream,
) -> syn::Result<TokenStream> {
    let (inner, optional) = optional_inner(ty).map_or((ty, false), |inner| (inner, true));
    if scalar_of(inner) != Some(Scalar::Str) {
        return Err(syn::Error::new_spanned(
            ty,
            "choices require a String or Option<String> field",
        ));
    }
    let choice = quote! { #krate::schema::TypeKind::choice([#(#choices),*]) };
    Ok(if optional {
        quote! { #krate::schema::TypeKind::optional(#choice) }
    } else {
        choice
    })
}
