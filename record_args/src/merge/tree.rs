//! The resolved value tree.

use std::fmt;

use serde_json::{Map, Value};

/// Source that supplied a leaf's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Typed on the command line.
    Cli,
    /// Read from the configuration document.
    Config,
    /// Taken from a declared default.
    Default,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cli => "cli",
            Self::Config => "config",
            Self::Default => "default",
        })
    }
}

/// A resolved leaf value.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedLeaf {
    name: String,
    path: String,
    value: Value,
    provenance: Provenance,
}

impl ResolvedLeaf {
    pub(crate) fn new(name: &str, path: &str, value: Value, provenance: Provenance) -> Self {
        Self {
            name: name.to_owned(),
            path: path.to_owned(),
            value,
            provenance,
        }
    }

    /// Dotted path of the leaf.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolved value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Source of the value.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }
}

/// A resolved record, top-level or nested.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRecord {
    name: String,
    path: String,
    fields: Vec<ResolvedNode>,
}

impl ResolvedRecord {
    pub(crate) fn new(alias: &str, fields: Vec<ResolvedNode>) -> Self {
        Self::nested(alias, alias, fields)
    }

    pub(crate) fn nested(name: &str, path: &str, fields: Vec<ResolvedNode>) -> Self {
        Self {
            name: name.to_owned(),
            path: path.to_owned(),
            fields,
        }
    }

    /// Alias for top-level records, field name for nested ones.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path of the record.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolved fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[ResolvedNode] {
        &self.fields
    }

    /// Assemble the record's value object, nested records first.
    #[must_use]
    pub fn to_value(&self) -> Value {
        ResolvedNode::assemble(&self.fields)
    }
}

/// One node of the resolved tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedNode {
    /// A leaf value.
    Leaf(ResolvedLeaf),
    /// A nested record.
    Record(ResolvedRecord),
}

impl ResolvedNode {
    fn name(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.name,
            Self::Record(record) => &record.name,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Leaf(leaf) => leaf.value.clone(),
            Self::Record(record) => record.to_value(),
        }
    }

    pub(crate) fn assemble(nodes: &[Self]) -> Value {
        Value::Object(
            nodes
                .iter()
                .map(|node| (node.name().to_owned(), node.to_value()))
                .collect::<Map<_, _>>(),
        )
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ResolvedLeaf>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf),
            Self::Record(record) => {
                for field in &record.fields {
                    field.collect_leaves(out);
                }
            }
        }
    }
}

/// Resolved values for every registered record, in registration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedTree {
    records: Vec<ResolvedRecord>,
}

impl ResolvedTree {
    pub(crate) const fn new(records: Vec<ResolvedRecord>) -> Self {
        Self { records }
    }

    /// Resolved top-level records.
    #[must_use]
    pub fn records(&self) -> &[ResolvedRecord] {
        &self.records
    }

    /// Every resolved leaf, depth-first.
    #[must_use]
    pub fn leaves(&self) -> Vec<&ResolvedLeaf> {
        let mut out = Vec::new();
        for record in &self.records {
            for field in &record.fields {
                field.collect_leaves(&mut out);
            }
        }
        out
    }
}
