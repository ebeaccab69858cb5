//! Primary error enum for registration and resolution flows.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while registering records or resolving arguments.
///
/// Every variant is fatal to the call that produced it. Variants carry the
/// offending dotted path or option name so callers can render an actionable
/// message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArgsError {
    /// Error parsing command-line arguments.
    ///
    /// Help and version requests also surface here; see
    /// [`crate::is_display_request`].
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A required leaf received no value from the CLI, the configuration
    /// document or a default.
    #[error(
        "missing required argument --{path}; provide it on the command line or in the config file"
    )]
    MissingRequiredField {
        /// Dotted path of the missing leaf.
        path: String,
    },

    /// A scalar value could not be converted to its declared type.
    #[error("invalid value '{value}' for --{path}: expected {expected}")]
    TypeCoercion {
        /// Dotted path of the offending leaf.
        path: String,
        /// Raw value that failed to convert.
        value: String,
        /// Name of the expected type.
        expected: &'static str,
    },

    /// A choice value was not one of the allowed members.
    #[error("invalid choice '{value}' for --{path} (choose from {})", .allowed.join(", "))]
    InvalidChoice {
        /// Dotted path of the offending leaf.
        path: String,
        /// Rejected value.
        value: String,
        /// Allowed members in declaration order.
        allowed: Vec<String>,
    },

    /// A tuple value had the wrong number of elements.
    #[error("invalid tuple for --{path}: expected {expected} values, got {actual}")]
    LengthMismatch {
        /// Dotted path of the offending leaf.
        path: String,
        /// Declared arity.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },

    /// A sequence or mapping value failed structural parsing.
    #[error("malformed value for --{path}: {message}")]
    MalformedCompound {
        /// Dotted path of the offending leaf.
        path: String,
        /// Description of the structural failure.
        message: String,
    },

    /// An alias or flag destination shadows a reserved keyword or an
    /// existing registration.
    #[error("'{name}' is reserved: {reason}")]
    ReservedAliasCollision {
        /// Alias, destination or option string that collided.
        name: String,
        /// What the name collides with.
        reason: String,
    },

    /// Two records, or a record and an auxiliary flag, share a destination.
    #[error("duplicate destination '{alias}'")]
    DuplicateAlias {
        /// Shared destination name.
        alias: String,
    },

    /// Two leaves synthesise the same dotted path.
    #[error("duplicate option --{path}")]
    DuplicatePath {
        /// Colliding dotted path.
        path: String,
    },

    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    ConfigFile {
        /// Path that triggered the configuration failure.
        path: Utf8PathBuf,
        /// Underlying error reported by the file loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configuration subtree carried a key the schema does not declare.
    #[error("unknown configuration key '{path}'")]
    UnknownConfigKey {
        /// Dotted path of the unknown key.
        path: String,
    },

    /// A declared default could not be converted into a value.
    #[error("invalid default for --{path}: {source}")]
    InvalidDefault {
        /// Dotted path of the leaf whose default failed.
        path: String,
        /// Serialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// The assembled values did not deserialise into the record type.
    #[error("failed to construct '{alias}': {source}")]
    Construction {
        /// Alias of the record being constructed.
        alias: String,
        /// Deserialisation failure.
        #[source]
        source: serde_json::Error,
    },
}
