//! Declared defaults for record fields.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

type Factory = Arc<dyn Fn() -> Result<Value, serde_json::Error> + Send + Sync>;

/// Default attached to a field declaration.
///
/// Factories run every time a default is needed, so each resolution receives
/// a fresh value.
#[derive(Clone, Default)]
pub enum DefaultValue {
    /// The field has no default and is therefore required.
    #[default]
    Absent,
    /// A fixed value.
    Literal(Value),
    /// A value produced on demand.
    Factory(Factory),
}

impl DefaultValue {
    /// Wrap a closure whose result is serialised when the default is needed.
    ///
    /// ```
    /// use record_args::schema::DefaultValue;
    /// let default = DefaultValue::from_fn(|| vec!["a".to_owned()]);
    /// let value = default.materialise().expect("serialisable");
    /// assert_eq!(value, Some(serde_json::json!(["a"])));
    /// ```
    #[must_use]
    pub fn from_fn<T, F>(factory: F) -> Self
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(move || serde_json::to_value(factory())))
    }

    /// Returns `true` when no default is declared.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Produce the default value, if one is declared.
    ///
    /// # Errors
    ///
    /// Returns the serialisation error raised by a factory whose output
    /// cannot be represented as a value.
    pub fn materialise(&self) -> Result<Option<Value>, serde_json::Error> {
        match self {
            Self::Absent => Ok(None),
            Self::Literal(value) => Ok(Some(value.clone())),
            Self::Factory(factory) => factory().map(Some),
        }
    }

    /// Text shown after `default:` in help output.
    ///
    /// Strings render without quotes; `null` and failing factories render
    /// nothing.
    #[must_use]
    pub fn display(&self) -> Option<String> {
        match self.materialise().ok().flatten()? {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
