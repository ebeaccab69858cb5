//! The subset of `#[serde(...)]` that shapes a record schema.
//!
//! Records are built by deserialising the resolved value tree, so a field's
//! schema name has to be the key serde reads, its default has to be the one
//! serde would fill in, and skipped fields must not become options.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Ident, LitStr, Token};

type Recase = fn(&str) -> String;

const RENAME_RULES: [(&str, Recase); 8] = [
    ("lowercase", str::to_ascii_lowercase),
    ("UPPERCASE", str::to_ascii_uppercase),
    ("PascalCase", <str as ToUpperCamelCase>::to_upper_camel_case),
    ("camelCase", <str as ToLowerCamelCase>::to_lower_camel_case),
    ("snake_case", <str as ToSnakeCase>::to_snake_case),
    ("SCREAMING_SNAKE_CASE", <str as ToShoutySnakeCase>::to_shouty_snake_case),
    ("kebab-case", <str as ToKebabCase>::to_kebab_case),
    ("SCREAMING-KEBAB-CASE", <str as ToShoutyKebabCase>::to_shouty_kebab_case),
];

/// A container-level `rename_all` rule.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RenameRule {
    recase: Recase,
}

impl RenameRule {
    fn parse(literal: &LitStr) -> syn::Result<Self> {
        let wanted = literal.value();
        RENAME_RULES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|&(_, recase)| Self { recase })
            .ok_or_else(|| {
                let known: Vec<&str> = RENAME_RULES.iter().map(|(name, _)| *name).collect();
                syn::Error::new(
                    literal.span(),
                    format!(
                        "unsupported serde rename_all value '{wanted}'; expected one of {}",
                        known.join(", ")
                    ),
                )
            })
    }

    fn apply(self, field: &str) -> String {
        (self.recase)(field)
    }
}

/// Where serde takes a missing value from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SerdeDefault {
    /// `#[serde(default)]`: the type's `Default` implementation.
    Trait,
    /// `#[serde(default = "path")]`: a function returning the value.
    Function(syn::Path),
}

/// Struct-level serde settings.
#[derive(Clone, Debug, Default)]
pub(crate) struct SerdeContainer {
    pub rename_all: Option<RenameRule>,
    pub default: Option<SerdeDefault>,
}

/// Field-level serde settings.
#[derive(Clone, Debug, Default)]
pub(crate) struct SerdeField {
    pub rename: Option<String>,
    pub default: Option<SerdeDefault>,
    pub skip: bool,
}

impl SerdeField {
    /// Key serde reads the field from under the container's rule.
    pub(crate) fn key(&self, ident: &Ident, rule: Option<RenameRule>) -> String {
        let plain = ident.to_string();
        match (&self.rename, rule) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => rule.apply(&plain),
            (None, None) => plain,
        }
    }
}

fn each_serde_entry<F>(attrs: &[Attribute], mut visit: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| visit(&meta))?;
    }
    Ok(())
}

/// Read `key = "..."` or the `deserialize` half of `key(deserialize = "...",
/// serialize = "...")`.
fn deserialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse().map(Some);
    }
    let mut found = None;
    if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("deserialize") {
                found = Some(nested.value()?.parse()?);
                Ok(())
            } else {
                super::discard_unknown(&nested)
            }
        })?;
    }
    Ok(found)
}

fn default_source(meta: &ParseNestedMeta) -> syn::Result<SerdeDefault> {
    if meta.input.peek(Token![=]) {
        let path: LitStr = meta.value()?.parse()?;
        Ok(SerdeDefault::Function(path.parse()?))
    } else {
        Ok(SerdeDefault::Trait)
    }
}

/// Collect the struct's `rename_all` rule and container default.
pub(crate) fn serde_container(attrs: &[Attribute]) -> syn::Result<SerdeContainer> {
    let mut out = SerdeContainer::default();
    each_serde_entry(attrs, |meta| {
        if meta.path.is_ident("rename_all") {
            if let Some(literal) = deserialize_name(meta)? {
                out.rename_all = Some(RenameRule::parse(&literal)?);
            }
            Ok(())
        } else if meta.path.is_ident("default") {
            out.default = Some(default_source(meta)?);
            Ok(())
        } else {
            super::discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Collect a field's rename, default and skip markers.
///
/// `skip` and `skip_deserializing` both drop the field; `skip_serializing`
/// does not affect deserialisation and is ignored.
pub(crate) fn serde_field(attrs: &[Attribute]) -> syn::Result<SerdeField> {
    let mut out = SerdeField::default();
    each_serde_entry(attrs, |meta| {
        if meta.path.is_ident("rename") {
            if let Some(literal) = deserialize_name(meta)? {
                out.rename = Some(literal.value());
            }
            Ok(())
        } else if meta.path.is_ident("default") {
            out.default = Some(default_source(meta)?);
            Ok(())
        } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
            out.skip = true;
            Ok(())
        } else {
            super::discard_unknown(meta)
        }
    })?;
    Ok(out)
}
