//! Conformance of configuration-document nodes.

use std::sync::Arc;

use serde_json::{Map, Number, Value};

use crate::schema::{ScalarKind, TypeKind};
use crate::{ArgsError, ArgsResult, ResolverOptions, merge};

use super::coerce_text;
use super::text::{choice_from_text, key_from_text};

/// Check `node` against `kind`, returning the normalised value.
///
/// Nodes already of the right shape are accepted as they are. A string
/// where another kind is expected goes through [`coerce_text`], so
/// `"a,b"` is a valid sequence in a configuration file too. `null` is only
/// accepted for optional kinds. Records embedded in compound kinds are
/// resolved against their schema with declared defaults filled in.
///
/// # Errors
///
/// Returns the same errors as [`coerce_text`], plus
/// [`ArgsError::MissingRequiredField`] for embedded records lacking a
/// required field.
pub fn conform_node(
    node: &Value,
    kind: &TypeKind,
    path: &str,
    options: ResolverOptions,
) -> ArgsResult<Value> {
    match (kind, node) {
        (TypeKind::Optional(_), Value::Null) => Ok(Value::Null),
        (TypeKind::Optional(inner), _) => conform_node(node, inner, path, options),
        (TypeKind::Record(schema), Value::Object(entries)) => {
            merge::resolve_detached(schema, entries, path, options)
        }
        (TypeKind::Scalar(ScalarKind::Str), Value::String(_)) => Ok(node.clone()),
        (TypeKind::Scalar(ScalarKind::Str), Value::Number(_) | Value::Bool(_)) => {
            Ok(Value::String(node.to_string()))
        }
        (TypeKind::Choice(allowed), Value::Number(_) | Value::Bool(_)) => {
            choice_from_text(&node.to_string(), allowed, path)
        }
        (TypeKind::Record(_), _) | (_, Value::Null) => Err(shape_error(node, kind, path)),
        (_, Value::String(text)) => coerce_text(text, kind, path, options),
        (TypeKind::Scalar(scalar), _) => scalar_node(node, *scalar, path),
        (TypeKind::Sequence(element), Value::Array(items)) => items
            .iter()
            .map(|item| conform_node(item, element, path, options))
            .collect::<ArgsResult<Vec<_>>>()
            .map(Value::Array),
        (TypeKind::Tuple(elements), Value::Array(items)) => {
            if items.len() != elements.len() {
                return Err(Arc::new(ArgsError::LengthMismatch {
                    path: path.to_owned(),
                    expected: elements.len(),
                    actual: items.len(),
                }));
            }
            items
                .iter()
                .zip(elements)
                .map(|(item, element)| conform_node(item, element, path, options))
                .collect::<ArgsResult<Vec<_>>>()
                .map(Value::Array)
        }
        (TypeKind::Mapping { key, value }, Value::Object(entries)) => {
            let mut out = Map::with_capacity(entries.len());
            for (raw_key, item) in entries {
                let typed_key = key_from_text(raw_key, *key, path, options)?;
                out.insert(typed_key, conform_node(item, value, path, options)?);
            }
            Ok(Value::Object(out))
        }
        _ => Err(shape_error(node, kind, path)),
    }
}

fn scalar_node(node: &Value, scalar: ScalarKind, path: &str) -> ArgsResult<Value> {
    let value = match (scalar, node) {
        (ScalarKind::Int, Value::Number(number)) => number.as_i64().map(Value::from),
        (ScalarKind::Float, Value::Number(number)) => number
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number),
        (ScalarKind::Bool, Value::Bool(flag)) => Some(Value::Bool(*flag)),
        _ => None,
    };
    value.ok_or_else(|| {
        Arc::new(ArgsError::type_coercion(
            path,
            node.to_string(),
            scalar.type_name(),
        ))
    })
}

fn shape_error(node: &Value, kind: &TypeKind, path: &str) -> Arc<ArgsError> {
    if let TypeKind::Scalar(scalar) = kind {
        return Arc::new(ArgsError::type_coercion(
            path,
            node.to_string(),
            scalar.type_name(),
        ));
    }
    let found = match node {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    };
    Arc::new(ArgsError::malformed(
        path,
        format!("expected {}, found {found}", kind.describe()),
    ))
}
