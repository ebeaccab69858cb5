//! Argument vector builders.

use camino::Utf8Path;

/// Prefix `args` with a program name, producing an owned argument vector.
///
/// ```
/// use test_helpers::argv::argv;
///
/// assert_eq!(argv(["--Config.count", "3"]), ["prog", "--Config.count", "3"]);
/// ```
#[must_use]
pub fn argv<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    std::iter::once("prog".to_owned())
        .chain(args.into_iter().map(Into::into))
        .collect()
}

/// Like [`argv`], with a `--config <path>` pair appended.
#[must_use]
pub fn argv_with_config<I, S>(args: I, config: &Utf8Path) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = argv(args);
    out.push("--config".to_owned());
    out.push(config.to_string());
    out
}
