//! Record schemas and the trait tying them to Rust types.

use serde::de::DeserializeOwned;

use super::FieldSpec;

/// Ordered field declarations for one record type.
#[derive(Clone, Debug)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// Start a schema for the record declared as `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field declaration.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Declared record name; used as the alias unless one is chosen at
    /// registration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field declarations in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Types that describe themselves with a [`RecordSchema`].
///
/// Usually derived with `#[derive(Record)]`; the type must also implement
/// [`serde::Deserialize`] because instances are built by deserialising the
/// resolved values.
///
/// ```
/// use record_args::Record;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, Record)]
/// struct Config {
///     /// The name to use
///     #[record(default = "test")]
///     name: String,
///     #[record(default = 5)]
///     count: i64,
/// }
///
/// let schema = Config::schema();
/// assert_eq!(schema.name(), "Config");
/// assert_eq!(schema.fields()[0].help_text(), Some("The name to use"));
/// ```
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    /// Describe the record's fields.
    fn schema() -> RecordSchema;
}
