//! Walked field descriptors carrying their full dotted path.

use super::{DefaultValue, FieldSpec, TypeKind};

/// A field placed in the option namespace.
///
/// Descriptors are produced by the schema walker when a record is
/// registered. Nested-record fields keep their expanded descendants in
/// [`FieldDescriptor::children`]; every other field is a leaf.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    spec: FieldSpec,
    path: String,
    declaring_record: String,
    children: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    pub(crate) const fn new(
        spec: FieldSpec,
        path: String,
        declaring_record: String,
        children: Vec<Self>,
    ) -> Self {
        Self {
            spec,
            path,
            declaring_record,
            children,
        }
    }

    /// Field name within its record.
    #[must_use]
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Fully qualified dotted path, starting with the record alias.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Command-line option string for this field.
    #[must_use]
    pub fn option_name(&self) -> String {
        format!("--{}", self.path)
    }

    /// Kind of value the field holds.
    #[must_use]
    pub const fn kind(&self) -> &TypeKind {
        self.spec.kind()
    }

    /// Declared default.
    #[must_use]
    pub const fn default_value(&self) -> &DefaultValue {
        self.spec.default_value()
    }

    /// Help text, if any.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.spec.help_text()
    }

    /// Returns `true` if no default is declared.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.spec.is_required()
    }

    /// Name of the record type declaring this field.
    #[must_use]
    pub fn declaring_record(&self) -> &str {
        &self.declaring_record
    }

    /// Expanded descendants of a nested-record field.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns `true` for nested-record fields.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        matches!(self.spec.kind(), TypeKind::Record(_))
    }

    /// Iterate over this field's leaves depth-first.
    pub fn leaves(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        if self.is_nested() {
            Box::new(self.children.iter().flat_map(Self::leaves))
        } else {
            Box::new(std::iter::once(self))
        }
    }
}
