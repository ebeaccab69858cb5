//! Expansion of registered records into a forest of field descriptors.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::result_ext::JsonResultExt;
use crate::schema::{FieldDescriptor, RecordSchema, TypeKind};
use crate::{ArgsError, ArgsResult};

/// Aliases that can never name a record.
pub const RESERVED_ALIASES: [&str; 2] = ["flags", "config_flag"];

/// Builds a record instance from its assembled value tree.
pub(crate) type Constructor =
    Arc<dyn Fn(Value) -> Result<Box<dyn Any + Send + Sync>, serde_json::Error> + Send + Sync>;

/// One registered record.
#[derive(Clone)]
pub struct RecordEntry {
    alias: String,
    schema: RecordSchema,
    fields: Vec<FieldDescriptor>,
    constructor: Constructor,
}

impl RecordEntry {
    /// Alias the record's options and result are exposed under.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Schema the record was registered with.
    #[must_use]
    pub const fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Top-level field descriptors.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Leaf descriptors in declaration order, depth-first.
    pub fn leaves(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().flat_map(FieldDescriptor::leaves)
    }

    pub(crate) fn construct(&self, value: Value) -> ArgsResult<Box<dyn Any + Send + Sync>> {
        (self.constructor)(value).or_construction(&self.alias)
    }
}

impl fmt::Debug for RecordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordEntry")
            .field("alias", &self.alias)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Registered records in registration order, keyed by unique alias.
#[derive(Clone, Debug, Default)]
pub struct SchemaForest {
    entries: Vec<RecordEntry>,
    paths: HashSet<String>,
}

impl SchemaForest {
    /// Walk `schema` under `alias` and add it to the forest.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::ReservedAliasCollision`] for a reserved alias,
    /// [`ArgsError::DuplicateAlias`] if the alias is taken and
    /// [`ArgsError::DuplicatePath`] if two fields expand to the same dotted
    /// path.
    pub(crate) fn register(
        &mut self,
        alias: &str,
        schema: RecordSchema,
        constructor: Constructor,
    ) -> ArgsResult<()> {
        if RESERVED_ALIASES.contains(&alias) {
            return Err(Arc::new(ArgsError::reserved(
                alias,
                "this keyword is reserved and cannot be used as a record alias",
            )));
        }
        if alias.is_empty() || alias.contains('.') {
            return Err(Arc::new(ArgsError::reserved(
                alias,
                "record aliases must be non-empty and must not contain '.'",
            )));
        }
        if self.contains(alias) {
            return Err(Arc::new(ArgsError::duplicate_alias(alias)));
        }
        let fields = describe(&schema, alias);
        let mut seen = HashSet::new();
        for path in fields.iter().flat_map(all_paths) {
            if self.paths.contains(path) || !seen.insert(path.to_owned()) {
                return Err(Arc::new(ArgsError::DuplicatePath {
                    path: path.to_owned(),
                }));
            }
        }
        debug!(alias, record = schema.name(), fields = seen.len(), "registered record");
        self.paths.extend(seen);
        self.entries.push(RecordEntry {
            alias: alias.to_owned(),
            schema,
            fields,
            constructor,
        });
        Ok(())
    }

    /// Returns `true` if a record is registered under `alias`.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.entries.iter().any(|entry| entry.alias == alias)
    }

    /// Registered records in registration order.
    #[must_use]
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Registered aliases in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.alias.as_str())
    }

    /// Every leaf across the forest.
    pub fn leaves(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.entries.iter().flat_map(RecordEntry::leaves)
    }
}

/// Expand the fields of `schema` under the dotted `prefix`.
pub(crate) fn describe(schema: &RecordSchema, prefix: &str) -> Vec<FieldDescriptor> {
    schema
        .fields()
        .iter()
        .map(|field| {
            let path = format!("{prefix}.{}", field.name());
            let children = match field.kind() {
                TypeKind::Record(nested) => describe(nested, &path),
                _ => Vec::new(),
            };
            FieldDescriptor::new(field.clone(), path, schema.name().to_owned(), children)
        })
        .collect()
}

fn all_paths(field: &FieldDescriptor) -> Box<dyn Iterator<Item = &str> + '_> {
    Box::new(
        std::iter::once(field.path()).chain(field.children().iter().flat_map(all_paths)),
    )
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::sync::Arc;

    use rstest::rstest;

    use super::{Constructor, SchemaForest};
    use crate::ArgsError;
    use crate::schema::{FieldSpec, RecordSchema, TypeKind};

    fn passthrough() -> Constructor {
        Arc::new(|value: serde_json::Value| Ok(Box::new(value) as Box<dyn Any + Send + Sync>))
    }

    fn outer() -> RecordSchema {
        let inner = RecordSchema::new("Inner")
            .field(FieldSpec::new("x", TypeKind::int()).default(1))
            .field(FieldSpec::new("y", TypeKind::int()).default(2));
        RecordSchema::new("Outer")
            .field(FieldSpec::new("name", TypeKind::string()))
            .field(FieldSpec::new("inner", TypeKind::record(inner)))
    }

    #[rstest]
    fn nested_fields_expand_to_dotted_leaves() {
        let mut forest = SchemaForest::default();
        forest
            .register("Outer", outer(), passthrough())
            .expect("register outer");
        let paths: Vec<_> = forest.leaves().map(|leaf| leaf.path().to_owned()).collect();
        assert_eq!(paths, ["Outer.name", "Outer.inner.x", "Outer.inner.y"]);
        let inner = forest.entries()[0].fields()[1].children();
        assert_eq!(inner[0].declaring_record(), "Inner");
    }

    #[rstest]
    #[case("flags")]
    #[case("config_flag")]
    fn reserved_aliases_are_rejected(#[case] alias: &str) {
        let mut forest = SchemaForest::default();
        let err = forest
            .register(alias, outer(), passthrough())
            .expect_err("reserved alias");
        assert!(matches!(&*err, ArgsError::ReservedAliasCollision { name, .. } if name == alias));
    }

    #[rstest]
    fn duplicate_aliases_are_rejected() {
        let mut forest = SchemaForest::default();
        forest
            .register("Outer", outer(), passthrough())
            .expect("first registration");
        let err = forest
            .register("Outer", outer(), passthrough())
            .expect_err("second registration");
        assert!(matches!(&*err, ArgsError::DuplicateAlias { alias } if alias == "Outer"));
    }

    #[rstest]
    fn colliding_field_names_are_rejected() {
        let schema = RecordSchema::new("Twice")
            .field(FieldSpec::new("a", TypeKind::int()))
            .field(FieldSpec::new("a", TypeKind::string()));
        let mut forest = SchemaForest::default();
        let err = forest
            .register("Twice", schema, passthrough())
            .expect_err("duplicate path");
        assert!(matches!(&*err, ArgsError::DuplicatePath { path } if path == "Twice.a"));
        assert!(!forest.contains("Twice"));
    }

    #[rstest]
    fn same_schema_under_two_aliases_is_allowed() {
        let mut forest = SchemaForest::default();
        forest
            .register("train", outer(), passthrough())
            .expect("train");
        forest
            .register("eval", outer(), passthrough())
            .expect("eval");
        assert_eq!(forest.aliases().collect::<Vec<_>>(), ["train", "eval"]);
    }
}
