//! Process-exit adapter for command-line entry points.
//!
//! The library itself only ever returns errors. Binaries that want the
//! usual behaviour of printing a usage message and exiting non-zero call
//! [`parse_or_exit`] instead of [`RecordArgs::parse`].

use clap::error::ErrorKind;

use crate::{ArgsError, ArgsResult, RecordArgs, Resolution};

/// Whether `err` is clap printing `--help` or `--version` output rather
/// than rejecting the command line.
///
/// Such errors should exit with status 0 via [`clap::Error::exit`].
#[must_use]
pub fn is_display_request(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

/// Parse the process arguments, exiting on any error.
///
/// Help and version requests print their output and exit with status 0.
/// Every other error is reported as a clap usage error and exits with
/// status 2.
#[must_use]
pub fn parse_or_exit(args: &RecordArgs) -> Resolution {
    exit_on_error(args, args.parse())
}

/// Unwrap `result`, exiting through clap's error reporting on failure.
pub fn exit_on_error<T>(args: &RecordArgs, result: ArgsResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => match &*err {
            ArgsError::CliParsing(clap_err) => {
                if !is_display_request(clap_err) {
                    tracing::debug!(kind = ?clap_err.kind(), "command line rejected");
                }
                clap_err.exit()
            }
            other => args.command().error(error_kind(other), other).exit(),
        },
    }
}

const fn error_kind(err: &ArgsError) -> ErrorKind {
    match err {
        ArgsError::MissingRequiredField { .. } => ErrorKind::MissingRequiredArgument,
        ArgsError::InvalidChoice { .. } => ErrorKind::InvalidValue,
        ArgsError::LengthMismatch { .. } => ErrorKind::WrongNumberOfValues,
        ArgsError::ConfigFile { .. } => ErrorKind::Io,
        _ => ErrorKind::ValueValidation,
    }
}

#[cfg(test)]
mod tests {
    use clap::Command;
    use clap::error::ErrorKind;
    use rstest::rstest;

    use super::{error_kind, is_display_request};
    use crate::ArgsError;

    #[rstest]
    #[case::help(ErrorKind::DisplayHelp, true)]
    #[case::version(ErrorKind::DisplayVersion, true)]
    #[case::unknown(ErrorKind::UnknownArgument, false)]
    #[case::invalid(ErrorKind::InvalidValue, false)]
    fn display_requests_are_told_apart(#[case] kind: ErrorKind, #[case] expected: bool) {
        let err = Command::new("prog").error(kind, "output");
        assert_eq!(is_display_request(&err), expected);
    }

    #[rstest]
    #[case(ArgsError::missing("A.b"), ErrorKind::MissingRequiredArgument)]
    #[case(ArgsError::type_coercion("A.b", "x", "an integer"), ErrorKind::ValueValidation)]
    #[case(ArgsError::duplicate_alias("A"), ErrorKind::ValueValidation)]
    fn errors_map_to_usage_kinds(#[case] err: ArgsError, #[case] kind: ErrorKind) {
        assert_eq!(error_kind(&err), kind);
    }
}
