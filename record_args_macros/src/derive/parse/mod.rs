//! Attribute and field parsing for `#[derive(Record)]`.

use syn::{Attribute, Expr, Lit, LitStr, Token, parenthesized};

mod input;
mod serde_attrs;
#[cfg(test)]
mod tests;

pub(crate) use input::{RecordField, RecordInput, parse_input};
pub(crate) use serde_attrs::{SerdeDefault, serde_container, serde_field};

/// Struct-level `#[record(...)]` settings.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Record name used in dotted paths when registered without an alias.
    pub name: Option<String>,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[record(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `record_args::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Record)]`.
///
/// - `default` supplies the value used when neither the command line nor a
///   configuration document sets the field.
/// - `choices` restricts a string field to the listed members.
/// - `help` sets the help text; doc comments are used otherwise.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub default: Option<Expr>,
    pub choices: Option<Vec<LitStr>>,
    pub help: Option<String>,
}

/// Iterate all `#[record(...)]` attributes once and apply a callback.
fn parse_record_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes a `#[serde(...)]` key this crate does not interpret.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn unknown_key(meta: &syn::meta::ParseNestedMeta, scope: &str) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| "<path>".to_owned(), ToString::to_string);
    meta.error(format!("unknown {scope} attribute `{key}`"))
}

/// Extracts `#[record(...)]` metadata applied to a struct.
///
/// Recognised keys are `name` and `crate`. Unknown keys are rejected so a
/// misspelt attribute fails to compile.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_record_attrs(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => {
                let value = string_value(meta, "name")?;
                if value.value().is_empty() || value.value().contains('.') {
                    return Err(syn::Error::new(
                        value.span(),
                        "record name must be non-empty and must not contain '.'",
                    ));
                }
                out.name = Some(value.value());
                Ok(())
            }
            Some("crate") => {
                let literal = string_value(meta, "crate")?;
                let path: syn::Path = syn::parse_str(&literal.value())
                    .map_err(|err| syn::Error::new(literal.span(), err))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => Err(unknown_key(meta, "struct")),
        }
    })?;
    Ok(out)
}

/// Read the string literal assigned to `key`.
fn string_value(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(text) => Ok(text),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}

fn parse_choices(meta: &syn::meta::ParseNestedMeta) -> syn::Result<Vec<LitStr>> {
    let content;
    parenthesized!(content in meta.input);
    let members = content.parse_terminated(|input| input.parse::<LitStr>(), Token![,])?;
    if members.is_empty() {
        return Err(meta.error("choices must list at least one member"));
    }
    Ok(members.into_iter().collect())
}

/// Parses field-level `#[record(...)]` attributes.
///
/// Recognised keys are `default`, `choices` and `help`.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_record_attrs(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("default") => {
                out.default = Some(meta.value()?.parse()?);
                Ok(())
            }
            Some("choices") => {
                out.choices = Some(parse_choices(meta)?);
                Ok(())
            }
            Some("help") => {
                out.help = Some(string_value(meta, "help")?.value());
                Ok(())
            }
            _ => Err(unknown_key(meta, "field")),
        }
    })?;
    Ok(out)
}

/// Joins `///` doc comment lines into a single help sentence.
///
/// Blank lines are dropped; `None` is returned when nothing remains.
pub(crate) fn doc_help(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }) => Some(s.value().trim().to_owned()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}
