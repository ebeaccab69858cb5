//! Coercion of command-line text.

use std::sync::Arc;

use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::schema::{ScalarKind, TypeKind};
use crate::{ArgsError, ArgsResult, ResolverOptions};

use super::conform_node;

/// Convert `raw` into a value of `kind`.
///
/// `path` is the dotted path of the field being coerced and is only used in
/// error reports.
///
/// # Examples
///
/// ```
/// use record_args::{ResolverOptions, coerce::coerce_text, schema::TypeKind};
/// use serde_json::json;
///
/// let kind = TypeKind::tuple([TypeKind::int(), TypeKind::int()]);
/// let options = ResolverOptions::default();
/// let value = coerce_text("(4,5)", &kind, "Config.coords", options).expect("valid tuple");
/// assert_eq!(value, json!([4, 5]));
/// ```
///
/// # Errors
///
/// Returns [`ArgsError::TypeCoercion`], [`ArgsError::InvalidChoice`],
/// [`ArgsError::LengthMismatch`] or [`ArgsError::MalformedCompound`]
/// depending on which rule of `kind` the text violates.
pub fn coerce_text(
    raw: &str,
    kind: &TypeKind,
    path: &str,
    options: ResolverOptions,
) -> ArgsResult<Value> {
    trace!(path, raw, kind = %kind.metavar(), "coercing text");
    match kind {
        TypeKind::Scalar(scalar) => scalar_from_text(raw, *scalar, path, options),
        TypeKind::Choice(allowed) => choice_from_text(raw, allowed, path),
        TypeKind::Sequence(element) => split_items(raw, '[', ']', path)?
            .into_iter()
            .map(|item| coerce_text(item, element, path, options))
            .collect::<ArgsResult<Vec<_>>>()
            .map(Value::Array),
        TypeKind::Tuple(elements) => {
            let items = split_items(raw, '(', ')', path)?;
            if items.len() != elements.len() {
                return Err(Arc::new(ArgsError::LengthMismatch {
                    path: path.to_owned(),
                    expected: elements.len(),
                    actual: items.len(),
                }));
            }
            items
                .into_iter()
                .zip(elements)
                .map(|(item, element)| coerce_text(item, element, path, options))
                .collect::<ArgsResult<Vec<_>>>()
                .map(Value::Array)
        }
        TypeKind::Mapping { key, value } => mapping_from_text(raw, *key, value, path, options),
        TypeKind::Optional(inner) => coerce_text(raw, inner, path, options),
        TypeKind::Record(schema) => Err(Arc::new(ArgsError::malformed(
            path,
            format!(
                "a '{}' record cannot be given as a single value; set its fields individually",
                schema.name()
            ),
        ))),
    }
}

pub(super) fn scalar_from_text(
    raw: &str,
    scalar: ScalarKind,
    path: &str,
    options: ResolverOptions,
) -> ArgsResult<Value> {
    let text = raw.trim();
    let value = match scalar {
        ScalarKind::Str => return Ok(Value::String(raw.to_owned())),
        ScalarKind::Int => text.parse::<i64>().ok().map(Value::from),
        ScalarKind::Float => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ScalarKind::Bool => options.bool_syntax.parse(text).map(Value::Bool),
    };
    value.ok_or_else(|| Arc::new(ArgsError::type_coercion(path, raw, scalar.type_name())))
}

pub(super) fn choice_from_text(raw: &str, allowed: &[String], path: &str) -> ArgsResult<Value> {
    if allowed.iter().any(|member| member == raw) {
        Ok(Value::String(raw.to_owned()))
    } else {
        Err(Arc::new(ArgsError::InvalidChoice {
            path: path.to_owned(),
            value: raw.to_owned(),
            allowed: allowed.to_vec(),
        }))
    }
}

/// Render a coerced mapping key back to the string form JSON objects use.
pub(super) fn key_from_text(
    raw: &str,
    key: ScalarKind,
    path: &str,
    options: ResolverOptions,
) -> ArgsResult<String> {
    Ok(match scalar_from_text(raw, key, path, options)? {
        Value::String(text) => text,
        other => other.to_string(),
    })
}

/// Strip one optional pair of delimiters and split the body on commas.
///
/// Elements are trimmed and empty elements are dropped.
fn split_items<'a>(raw: &'a str, open: char, close: char, path: &str) -> ArgsResult<Vec<&'a str>> {
    let trimmed = raw.trim();
    let body = match (trimmed.strip_prefix(open), trimmed.ends_with(close)) {
        (Some(rest), true) => rest.strip_suffix(close).unwrap_or_default(),
        (None, false) => trimmed,
        _ => {
            return Err(Arc::new(ArgsError::malformed(
                path,
                format!("unbalanced '{open}{close}' in '{raw}'"),
            )));
        }
    };
    Ok(body
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect())
}

fn mapping_from_text(
    raw: &str,
    key: ScalarKind,
    value: &TypeKind,
    path: &str,
    options: ResolverOptions,
) -> ArgsResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    match (trimmed.starts_with('{'), trimmed.ends_with('}')) {
        (true, true) => json_mapping(trimmed, key, value, path, options),
        (false, false) => pairs_mapping(trimmed, key, value, path, options),
        _ => Err(Arc::new(ArgsError::malformed(
            path,
            format!("unbalanced braces in '{raw}'"),
        ))),
    }
}

fn json_mapping(
    text: &str,
    key: ScalarKind,
    value: &TypeKind,
    path: &str,
    options: ResolverOptions,
) -> ArgsResult<Value> {
    let parsed: Value = serde_json::from_str(text)
        .map_err(|err| Arc::new(ArgsError::malformed(path, format!("invalid JSON: {err}"))))?;
    let Value::Object(entries) = parsed else {
        return Err(Arc::new(ArgsError::malformed(
            path,
            "JSON value must be an object",
        )));
    };
    let mut out = Map::with_capacity(entries.len());
    for (raw_key, node) in &entries {
        let typed_key = key_from_text(raw_key, key, path, options)?;
        out.insert(typed_key, conform_node(node, value, path, options)?);
    }
    Ok(Value::Object(out))
}

fn pairs_mapping(
    text: &str,
    key: ScalarKind,
    value: &TypeKind,
    path: &str,
    options: ResolverOptions,
) -> ArgsResult<Value> {
    let mut out = Map::new();
    for pair in text.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
        let Some((raw_key, raw_value)) = pair.split_once('=') else {
            return Err(Arc::new(ArgsError::malformed(
                path,
                format!("invalid key=value pair '{pair}' (missing '=')"),
            )));
        };
        let typed_key = key_from_text(raw_key.trim(), key, path, options)?;
        out.insert(typed_key, coerce_text(raw_value.trim(), value, path, options)?);
    }
    Ok(Value::Object(out))
}
