//! Conversions from foreign errors into [`ArgsResult`].
//!
//! ```
//! use clap::Command;
//! use record_args::{ArgsError, ArgsResultExt};
//!
//! let err = Command::new("prog")
//!     .try_get_matches_from(["prog", "--unknown"])
//!     .into_args()
//!     .err();
//! assert!(matches!(err.as_deref(), Some(ArgsError::CliParsing(_))));
//! ```

use std::sync::Arc;

use crate::{ArgsError, ArgsResult};

/// Lift any `Result` whose error converts into [`ArgsError`].
pub trait ArgsResultExt<T, E> {
    /// Convert the error through `Into<ArgsError>` and share it behind an
    /// [`Arc`].
    ///
    /// # Errors
    ///
    /// Propagates the converted error.
    fn into_args(self) -> ArgsResult<T>;
}

impl<T, E> ArgsResultExt<T, E> for Result<T, E>
where
    E: Into<ArgsError>,
{
    fn into_args(self) -> ArgsResult<T> {
        self.map_err(|err| Arc::new(err.into()))
    }
}

impl From<clap::Error> for ArgsError {
    fn from(err: clap::Error) -> Self {
        Self::CliParsing(Box::new(err))
    }
}

/// Attach a destination to `serde_json` failures.
pub(crate) trait JsonResultExt<T> {
    /// The value under `alias` did not deserialise into its target type.
    fn or_construction(self, alias: &str) -> ArgsResult<T>;

    /// The declared default of the leaf at `path` did not serialise.
    fn or_invalid_default(self, path: &str) -> ArgsResult<T>;
}

impl<T> JsonResultExt<T> for Result<T, serde_json::Error> {
    fn or_construction(self, alias: &str) -> ArgsResult<T> {
        self.map_err(|source| {
            Arc::new(ArgsError::Construction {
                alias: alias.to_owned(),
                source,
            })
        })
    }

    fn or_invalid_default(self, path: &str) -> ArgsResult<T> {
        self.map_err(|source| {
            Arc::new(ArgsError::InvalidDefault {
                path: path.to_owned(),
                source,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::{Command, error::ErrorKind};
    use rstest::rstest;
    use serde_json::json;

    use super::{ArgsResultExt, JsonResultExt};
    use crate::ArgsError;

    #[rstest]
    fn clap_failures_become_cli_parsing() {
        let err = Command::new("prog")
            .try_get_matches_from(["prog", "extra"])
            .into_args()
            .expect_err("unexpected positional");
        assert!(matches!(
            &*err,
            ArgsError::CliParsing(inner) if inner.kind() == ErrorKind::UnknownArgument
        ));
    }

    #[rstest]
    fn json_failures_name_their_destination() {
        let construct = serde_json::from_value::<u8>(json!("x"))
            .or_construction("times")
            .expect_err("string is not u8");
        assert!(matches!(&*construct, ArgsError::Construction { alias, .. } if alias == "times"));

        let default = serde_json::from_value::<u8>(json!(-1))
            .or_invalid_default("App.level")
            .expect_err("negative is not u8");
        assert_eq!(default.path(), Some("App.level"));
    }
}
