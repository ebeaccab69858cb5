//! Field declarations.

use serde::Serialize;
use serde_json::Value;

use super::{DefaultValue, TypeKind};

/// Declaration of one field within a [`super::RecordSchema`].
///
/// Fields without a default are required. Optional fields default to
/// `null` unless another default is declared.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    name: String,
    kind: TypeKind,
    default: DefaultValue,
    help: Option<String>,
}

impl FieldSpec {
    /// Declare a field called `name` of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        let default = if matches!(kind, TypeKind::Optional(_)) {
            DefaultValue::Literal(Value::Null)
        } else {
            DefaultValue::Absent
        };
        Self {
            name: name.into(),
            kind,
            default,
            help: None,
        }
    }

    /// Attach a literal default.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::Literal(value.into());
        self
    }

    /// Attach a default computed by `factory` each time it is needed.
    #[must_use]
    pub fn default_with<T, F>(mut self, factory: F) -> Self
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.default = DefaultValue::from_fn(factory);
        self
    }

    /// Replace the default wholesale.
    #[must_use]
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    /// Attach help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        let text = help.into();
        self.help = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Field name as it appears in option names and configuration keys.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of value the field holds.
    #[must_use]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Declared default.
    #[must_use]
    pub const fn default_value(&self) -> &DefaultValue {
        &self.default
    }

    /// Help text, if any.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Returns `true` if no default is declared.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_absent()
    }
}
