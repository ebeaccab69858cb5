//! Synthesis of dotted command-line options from the schema forest.

use clap::{Arg, ArgAction, ArgMatches, parser::ValueSource};
use tracing::trace;

use crate::merge::CliValues;
use crate::schema::FieldDescriptor;
use crate::walker::SchemaForest;

/// Option definition for one leaf field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagSpec {
    path: String,
    metavar: String,
    help: String,
}

impl FlagSpec {
    fn for_leaf(leaf: &FieldDescriptor) -> Self {
        let default = leaf
            .default_value()
            .display()
            .map(|shown| format!("(default: {shown})"));
        let help = match (leaf.help_text(), default) {
            (Some(text), Some(suffix)) => format!("{text} {suffix}"),
            (Some(text), None) => text.to_owned(),
            (None, Some(suffix)) => suffix,
            (None, None) => String::new(),
        };
        Self {
            path: leaf.path().to_owned(),
            metavar: leaf.kind().metavar(),
            help,
        }
    }

    /// Dotted path, used as both the clap id and the long option name.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Option string as typed on the command line.
    #[must_use]
    pub fn option_name(&self) -> String {
        format!("--{}", self.path)
    }

    /// Value placeholder shown in help output.
    #[must_use]
    pub fn metavar(&self) -> &str {
        &self.metavar
    }

    /// Help text including any `(default: ...)` suffix.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Build the clap argument.
    ///
    /// The argument takes exactly one value and carries no clap-side
    /// default, so an absent option is never confused with one explicitly
    /// set to its default.
    #[must_use]
    pub fn to_arg(&self) -> Arg {
        Arg::new(self.path.clone())
            .long(self.path.clone())
            .value_name(self.metavar.clone())
            .help(self.help.clone())
            .action(ArgAction::Set)
            .num_args(1)
            .allow_negative_numbers(true)
            .value_parser(clap::value_parser!(String))
    }
}

/// Option definitions for every command-line settable leaf in `forest`.
///
/// Leaves whose kind embeds a record are configuration-only and are
/// skipped.
#[must_use]
pub fn synthesize(forest: &SchemaForest) -> Vec<FlagSpec> {
    forest
        .leaves()
        .filter(|leaf| leaf.kind().is_cli_settable())
        .map(FlagSpec::for_leaf)
        .collect()
}

/// Collect the values the user typed for `specs`.
///
/// Only values whose source is the command line are kept.
#[must_use]
pub fn read_cli_values(matches: &ArgMatches, specs: &[FlagSpec]) -> CliValues {
    let mut values = CliValues::default();
    for spec in specs {
        if matches.value_source(spec.path()) != Some(ValueSource::CommandLine) {
            continue;
        }
        if let Some(raw) = matches.get_one::<String>(spec.path()) {
            trace!(path = spec.path(), raw = raw.as_str(), "read command-line value");
            values.insert(spec.path(), raw.clone());
        }
    }
    values
}
