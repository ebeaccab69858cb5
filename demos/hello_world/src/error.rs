//! Error types for the `hello_world` demo.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised by the hello world demo.
#[derive(Debug, Error)]
pub enum HelloWorldError {
    /// Wraps registration and resolution failures from `record_args`.
    #[error("failed to resolve arguments: {0}")]
    Arguments(#[from] Arc<record_args::ArgsError>),
    /// The resolution carried no record under the expected alias.
    #[error("no '{0}' record was resolved")]
    MissingRecord(&'static str),
    /// Bubbles up validation issues detected before greeting.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Writing the greeting failed.
    #[error("failed to write greeting: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation issues detected in a resolved greeting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No greeting words were provided.
    #[error("at least one salutation must be provided")]
    MissingSalutation,
    /// The recipient collapsed to nothing after trimming.
    #[error("the recipient must contain visible characters")]
    BlankRecipient,
    /// A repeat count of zero would print nothing.
    #[error("--times must be greater than zero")]
    ZeroRepeat,
}
