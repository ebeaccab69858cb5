//! Code generation for `#[derive(Record)]`.

mod kind;
#[cfg(test)]
mod tests;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Expr, ExprLit, Lit};

use super::crate_path;
use super::parse::{RecordField, RecordInput, SerdeDefault};

/// Generate the `Record` implementation for `record`.
pub(crate) fn record_impl(record: &RecordInput) -> syn::Result<TokenStream> {
    let krate = crate_path::resolve(record.attrs.crate_path.as_ref());
    let ident = &record.ident;
    let name = &record.name;
    let fields = record
        .fields
        .iter()
        .map(|field| field_spec(record, field, &krate))
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(quote! {
        impl #krate::Record for #ident {
            fn schema() -> #krate::schema::RecordSchema {
                #krate::schema::RecordSchema::new(#name)
                    #(.field(#fields))*
            }
        }
    })
}

fn field_spec(
    record: &RecordInput,
    field: &RecordField,
    krate: &TokenStream,
) -> syn::Result<TokenStream> {
    let key = &field.key;
    let kind = match &field.attrs.choices {
        Some(choices) => kind::choice_tokens(&field.ty, choices, krate)?,
        None => kind::kind_tokens(&field.ty, krate)?,
    };
    let default = default_tokens(record, field);
    let help = field.help.as_ref().map(|help| quote! { .help(#help) });
    Ok(quote! {
        #krate::schema::FieldSpec::new(#key, #kind)
            #default
            #help
    })
}

/// Builder call attaching the field's default, if it has one.
///
/// An explicit `#[record(default = ...)]` wins over serde defaults. String
/// literals are converted with `Into`, so `"8080"`-style text fills `String`,
/// `PathBuf` and `Option<String>` fields alike.
fn default_tokens(record: &RecordInput, field: &RecordField) -> Option<TokenStream> {
    let ty = &field.ty;
    if let Some(expr) = &field.attrs.default {
        let value = match expr {
            Expr::Lit(ExprLit {
                lit: Lit::Str(_), ..
            }) if kind::optional_inner(ty).is_some() => {
                quote! { ::core::option::Option::Some(::core::convert::Into::into(#expr)) }
            }
            Expr::Lit(ExprLit {
                lit: Lit::Str(_), ..
            }) => quote! { ::core::convert::Into::into(#expr) },
            _ => quote! { #expr },
        };
        return Some(quote! {
            .default_with(|| {
                let value: #ty = #value;
                value
            })
        });
    }
    match &field.serde_default {
        Some(SerdeDefault::Trait) => {
            return Some(quote! { .default_with(<#ty as ::core::default::Default>::default) });
        }
        Some(SerdeDefault::Function(path)) => {
            return Some(quote! {
                .default_with(|| {
                    let value: #ty = #path();
                    value
                })
            });
        }
        None => {}
    }
    let owner = &record.ident;
    let member = &field.ident;
    match &record.container_default {
        Some(SerdeDefault::Trait) => Some(quote! {
            .default_with(|| <#owner as ::core::default::Default>::default().#member)
        }),
        Some(SerdeDefault::Function(path)) => Some(quote! {
            .default_with(|| {
                let base: #owner = #path();
                base.#member
            })
        }),
        None => None,
    }
}
