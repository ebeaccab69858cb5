//! Per-leaf merging of command-line values, configuration and defaults.
//!
//! Every leaf takes the first value found in this order:
//!
//! 1. the command line,
//! 2. the configuration document at the leaf's nested path,
//! 3. a whole-record default declared on an enclosing field,
//! 4. the leaf's own declared default.
//!
//! A required leaf with none of these aborts the resolution with
//! [`ArgsError::MissingRequiredField`].

mod tree;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::coerce::{coerce_text, conform_node};
use crate::file::ConfigDocument;
use crate::result_ext::JsonResultExt;
use crate::schema::{FieldDescriptor, RecordSchema};
use crate::walker::{SchemaForest, describe};
use crate::{ArgsError, ArgsResult, ResolverOptions, UnknownKeyPolicy};

pub use tree::{Provenance, ResolvedLeaf, ResolvedNode, ResolvedRecord, ResolvedTree};

/// Raw command-line values keyed by dotted path.
///
/// A path is present only when the user typed it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliValues {
    values: HashMap<String, String>,
}

impl CliValues {
    /// Record `raw` as the value typed for `path`.
    pub fn insert(&mut self, path: impl Into<String>, raw: impl Into<String>) {
        self.values.insert(path.into(), raw.into());
    }

    /// Raw value typed for `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    /// Returns `true` if nothing was typed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CliValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(path, raw)| (path.into(), raw.into()))
                .collect(),
        }
    }
}

/// Resolve every registered record.
///
/// # Errors
///
/// Fails on the first leaf that cannot be coerced or has no value.
pub fn resolve_forest(
    forest: &SchemaForest,
    cli: &CliValues,
    config: Option<&ConfigDocument>,
    options: ResolverOptions,
) -> ArgsResult<ResolvedTree> {
    let resolver = Resolver { cli, options };
    let records = forest
        .entries()
        .iter()
        .map(|entry| {
            let section = match config.and_then(|document| document.get(entry.alias())) {
                None | Some(Value::Null) => None,
                Some(Value::Object(section)) => Some(section),
                Some(_) => {
                    return Err(Arc::new(ArgsError::malformed(
                        entry.alias(),
                        "configuration section must be a mapping",
                    )));
                }
            };
            let fields = resolver.resolve_fields(entry.fields(), section, None, entry.alias())?;
            Ok(ResolvedRecord::new(entry.alias(), fields))
        })
        .collect::<ArgsResult<Vec<_>>>()?;
    Ok(ResolvedTree::new(records))
}

/// Resolve a record supplied as a configuration node inside a compound
/// value, such as one element of a list of records.
///
/// Missing fields take their declared defaults. The command line plays no
/// part.
///
/// # Errors
///
/// Fails when a field cannot be conformed or a required field is absent.
pub(crate) fn resolve_detached(
    schema: &RecordSchema,
    entries: &Map<String, Value>,
    path: &str,
    options: ResolverOptions,
) -> ArgsResult<Value> {
    let cli = CliValues::default();
    let resolver = Resolver { cli: &cli, options };
    let fields = describe(schema, path);
    let nodes = resolver.resolve_fields(&fields, Some(entries), None, path)?;
    Ok(ResolvedNode::assemble(&nodes))
}

struct Resolver<'a> {
    cli: &'a CliValues,
    options: ResolverOptions,
}

impl Resolver<'_> {
    fn resolve_fields(
        &self,
        fields: &[FieldDescriptor],
        section: Option<&Map<String, Value>>,
        inherited: Option<&Map<String, Value>>,
        record_path: &str,
    ) -> ArgsResult<Vec<ResolvedNode>> {
        if let Some(entries) = section {
            self.check_unknown_keys(fields, entries, record_path)?;
        }
        fields
            .iter()
            .map(|field| self.resolve_field(field, section, inherited))
            .collect()
    }

    fn check_unknown_keys(
        &self,
        fields: &[FieldDescriptor],
        section: &Map<String, Value>,
        record_path: &str,
    ) -> ArgsResult<()> {
        let unknown = section
            .keys()
            .filter(|key| !fields.iter().any(|field| field.name() == key.as_str()));
        for key in unknown {
            let path = format!("{record_path}.{key}");
            match self.options.unknown_keys {
                UnknownKeyPolicy::Ignore => {
                    warn!(path = path.as_str(), "ignoring unknown configuration key");
                }
                UnknownKeyPolicy::Reject => {
                    return Err(Arc::new(ArgsError::UnknownConfigKey { path }));
                }
            }
        }
        Ok(())
    }

    fn resolve_field(
        &self,
        field: &FieldDescriptor,
        section: Option<&Map<String, Value>>,
        inherited: Option<&Map<String, Value>>,
    ) -> ArgsResult<ResolvedNode> {
        let node = section.and_then(|entries| entries.get(field.name()));
        let inherited_node = inherited.and_then(|entries| entries.get(field.name()));
        if field.is_nested() {
            return self.resolve_nested(field, node, inherited_node);
        }
        let (value, provenance) = self.resolve_leaf(field, node, inherited_node)?;
        debug!(path = field.path(), ?provenance, "resolved leaf");
        Ok(ResolvedNode::Leaf(ResolvedLeaf::new(
            field.name(),
            field.path(),
            value,
            provenance,
        )))
    }

    fn resolve_nested(
        &self,
        field: &FieldDescriptor,
        node: Option<&Value>,
        inherited: Option<&Value>,
    ) -> ArgsResult<ResolvedNode> {
        let section = match node {
            None | Some(Value::Null) => None,
            Some(Value::Object(entries)) => Some(entries),
            Some(_) => {
                return Err(Arc::new(ArgsError::malformed(
                    field.path(),
                    format!("expected {} as a mapping", field.kind().describe()),
                )));
            }
        };
        let own_default = match inherited {
            Some(_) => None,
            None => declared_default(field)?,
        };
        let defaults = inherited.or(own_default.as_ref()).and_then(Value::as_object);
        let children = self.resolve_fields(field.children(), section, defaults, field.path())?;
        Ok(ResolvedNode::Record(ResolvedRecord::nested(
            field.name(),
            field.path(),
            children,
        )))
    }

    fn resolve_leaf(
        &self,
        field: &FieldDescriptor,
        node: Option<&Value>,
        inherited: Option<&Value>,
    ) -> ArgsResult<(Value, Provenance)> {
        if let Some(raw) = self.cli.get(field.path()) {
            let value = coerce_text(raw, field.kind(), field.path(), self.options)?;
            return Ok((value, Provenance::Cli));
        }
        if let Some(config_node) = node {
            let value = conform_node(config_node, field.kind(), field.path(), self.options)?;
            return Ok((value, Provenance::Config));
        }
        if let Some(value) = inherited {
            return Ok((value.clone(), Provenance::Default));
        }
        declared_default(field)?
            .map(|value| (value, Provenance::Default))
            .ok_or_else(|| Arc::new(ArgsError::missing(field.path())))
    }
}

fn declared_default(field: &FieldDescriptor) -> ArgsResult<Option<Value>> {
    field
        .default_value()
        .materialise()
        .or_invalid_default(field.path())
}
