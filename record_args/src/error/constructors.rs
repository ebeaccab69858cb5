//! Constructors for `ArgsError` used across the resolution pipeline.

use std::error::Error;

use camino::Utf8Path;

use super::ArgsError;

impl ArgsError {
    /// Construct a [`ArgsError::MissingRequiredField`] for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_args::ArgsError;
    /// let err = ArgsError::missing("Config.required");
    /// assert!(err.to_string().contains("--Config.required"));
    /// ```
    #[must_use]
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingRequiredField { path: path.into() }
    }

    /// Construct a [`ArgsError::TypeCoercion`] for a rejected scalar.
    #[must_use]
    pub fn type_coercion(
        path: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::TypeCoercion {
            path: path.into(),
            value: value.into(),
            expected,
        }
    }

    /// Construct a [`ArgsError::MalformedCompound`] describing a structural
    /// parse failure.
    #[must_use]
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedCompound {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Construct a [`ArgsError::ReservedAliasCollision`].
    ///
    /// # Examples
    ///
    /// ```
    /// use record_args::ArgsError;
    /// let err = ArgsError::reserved("flags", "reserved for auxiliary flags");
    /// assert!(matches!(err, ArgsError::ReservedAliasCollision { .. }));
    /// ```
    #[must_use]
    pub fn reserved(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReservedAliasCollision {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Construct a [`ArgsError::DuplicateAlias`].
    #[must_use]
    pub fn duplicate_alias(alias: impl Into<String>) -> Self {
        Self::DuplicateAlias {
            alias: alias.into(),
        }
    }

    /// Construct a [`ArgsError::ConfigFile`] for a configuration path.
    #[must_use]
    pub fn config_file(path: &Utf8Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::ConfigFile {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }

    /// Returns the dotted path the error refers to, when it refers to one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { path }
            | Self::TypeCoercion { path, .. }
            | Self::InvalidChoice { path, .. }
            | Self::LengthMismatch { path, .. }
            | Self::MalformedCompound { path, .. }
            | Self::DuplicatePath { path }
            | Self::UnknownConfigKey { path }
            | Self::InvalidDefault { path, .. } => Some(path),
            _ => None,
        }
    }
}
