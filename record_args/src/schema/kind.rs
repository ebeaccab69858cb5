//! Type kinds understood by the coercer.

use super::RecordSchema;

/// Primitive scalar types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Signed 64-bit integer.
    Int,
    /// Finite 64-bit float.
    Float,
    /// Boolean written as an explicit token.
    Bool,
    /// Free-form text.
    Str,
}

impl ScalarKind {
    /// Placeholder shown in help output for options of this kind.
    #[must_use]
    pub const fn metavar(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Bool => "BOOL",
            Self::Str => "STRING",
        }
    }

    /// Human-readable name used in coercion errors.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Int => "an integer",
            Self::Float => "a float",
            Self::Bool => "a boolean",
            Self::Str => "a string",
        }
    }
}

/// Shape of a field's value.
///
/// Compound kinds nest recursively, so `Vec<HashMap<String, i64>>` is a
/// sequence of mappings from string to int.
#[derive(Clone, Debug)]
pub enum TypeKind {
    /// A single primitive value.
    Scalar(ScalarKind),
    /// A string restricted to the listed members.
    Choice(Vec<String>),
    /// A variable-length sequence.
    Sequence(Box<TypeKind>),
    /// A fixed-arity tuple; element `i` has kind `i`.
    Tuple(Vec<TypeKind>),
    /// A mapping with scalar keys.
    Mapping {
        /// Kind each key is coerced to.
        key: ScalarKind,
        /// Kind each value is coerced to.
        value: Box<TypeKind>,
    },
    /// A value that may be `null`.
    Optional(Box<TypeKind>),
    /// A nested record whose fields expand into their own options.
    Record(RecordSchema),
}

impl TypeKind {
    /// Integer scalar.
    #[must_use]
    pub const fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    /// Float scalar.
    #[must_use]
    pub const fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    /// Boolean scalar.
    #[must_use]
    pub const fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    /// String scalar.
    #[must_use]
    pub const fn string() -> Self {
        Self::Scalar(ScalarKind::Str)
    }

    /// String restricted to `allowed`.
    #[must_use]
    pub fn choice<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice(allowed.into_iter().map(Into::into).collect())
    }

    /// Sequence of `element`.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Tuple with the given element kinds.
    #[must_use]
    pub fn tuple<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Tuple(elements.into_iter().collect())
    }

    /// Mapping from `key` to `value`.
    #[must_use]
    pub fn map(key: ScalarKind, value: Self) -> Self {
        Self::Mapping {
            key,
            value: Box::new(value),
        }
    }

    /// Nullable `inner`.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Nested record.
    #[must_use]
    pub const fn record(schema: RecordSchema) -> Self {
        Self::Record(schema)
    }

    /// Returns `true` if a nested record appears anywhere in this kind.
    ///
    /// Such values can only be supplied by configuration documents.
    #[must_use]
    pub fn contains_record(&self) -> bool {
        match self {
            Self::Scalar(_) | Self::Choice(_) => false,
            Self::Record(_) => true,
            Self::Sequence(inner) | Self::Optional(inner) => inner.contains_record(),
            Self::Mapping { value, .. } => value.contains_record(),
            Self::Tuple(elements) => elements.iter().any(Self::contains_record),
        }
    }

    /// Returns `true` if values of this kind can be written on the command
    /// line.
    #[must_use]
    pub fn is_cli_settable(&self) -> bool {
        !self.contains_record()
    }

    /// Placeholder shown in help output.
    ///
    /// ```
    /// use record_args::schema::TypeKind;
    /// assert_eq!(TypeKind::int().metavar(), "INT");
    /// assert_eq!(TypeKind::choice(["a", "b"]).metavar(), "{a|b}");
    /// assert_eq!(TypeKind::list(TypeKind::string()).metavar(), "LIST");
    /// ```
    #[must_use]
    pub fn metavar(&self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.metavar().to_owned(),
            Self::Choice(allowed) => format!("{{{}}}", allowed.join("|")),
            Self::Sequence(_) => "LIST".to_owned(),
            Self::Tuple(_) => "TUPLE".to_owned(),
            Self::Mapping { .. } => "DICT".to_owned(),
            Self::Optional(inner) => inner.metavar(),
            Self::Record(schema) => schema.name().to_uppercase(),
        }
    }

    /// Short description of the expected shape, used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.type_name().to_owned(),
            Self::Choice(allowed) => format!("one of {}", allowed.join(", ")),
            Self::Sequence(inner) => format!("a list of {}", inner.describe()),
            Self::Tuple(elements) => {
                let mut out = format!("a tuple of {} values (", elements.len());
                for (idx, element) in elements.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&element.metavar());
                }
                out.push(')');
                out
            }
            Self::Mapping { key, value } => format!(
                "a mapping from {} to {}",
                key.type_name(),
                value.describe()
            ),
            Self::Optional(inner) => format!("{} or null", inner.describe()),
            Self::Record(schema) => format!("a '{}' record", schema.name()),
        }
    }
}
