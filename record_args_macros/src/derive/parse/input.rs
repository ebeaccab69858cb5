//! Input parsing for the `Record` derive macro.
//!
//! This module gathers the struct identifier, fields, and relevant attribute
//! metadata in one pass so macro expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{
    FieldAttrs, SerdeDefault, StructAttrs, doc_help, parse_field_attrs, parse_struct_attrs,
    serde_container, serde_field,
};

/// A struct accepted by `#[derive(Record)]`.
pub(crate) struct RecordInput {
    pub ident: syn::Ident,
    /// Record name; the struct identifier unless overridden.
    pub name: String,
    pub attrs: StructAttrs,
    /// `#[serde(default)]` on the container.
    pub container_default: Option<SerdeDefault>,
    pub fields: Vec<RecordField>,
}

/// A field that takes part in the schema.
pub(crate) struct RecordField {
    pub ident: syn::Ident,
    /// Key serde reads the field from, which is also its schema name.
    pub key: String,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
    /// `#[serde(default)]` on the field.
    pub serde_default: Option<SerdeDefault>,
    pub help: Option<String>,
}

/// Gathers information from the user-provided struct.
///
/// Only non-generic structs with named fields are accepted. Fields marked
/// `#[serde(skip)]` never reach the schema.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<RecordInput> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Record requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let attrs = parse_struct_attrs(&input.attrs)?;
    let container = serde_container(&input.attrs)?;

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let serde = serde_field(&field.attrs)?;
        if serde.skip {
            continue;
        }
        let Some(field_ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Record requires named fields"));
        };
        let field_attrs = parse_field_attrs(&field.attrs)?;
        let help = field_attrs.help.clone().or_else(|| doc_help(&field.attrs));
        fields.push(RecordField {
            key: serde.key(&field_ident, container.rename_all),
            ident: field_ident,
            ty: field.ty.clone(),
            attrs: field_attrs,
            serde_default: serde.default,
            help,
        });
    }

    let name = attrs.name.clone().unwrap_or_else(|| ident.to_string());
    Ok(RecordInput {
        ident,
        name,
        attrs,
        container_default: container.default,
        fields,
    })
}
