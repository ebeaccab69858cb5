//! Resolution sessions.
//!
//! A [`RecordArgs`] session owns the registered records and flags. It is
//! immutable once built, so one session can resolve any number of command
//! lines, each call independent of the last.

mod builder;

use std::collections::BTreeMap;
use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::{ArgMatches, Command};
use tracing::debug;

use crate::build::assemble;
use crate::config_flag::ConfigFlag;
use crate::file::{ConfigDocument, load_config_document};
use crate::flags::{FlagSpec, read_cli_values};
use crate::merge::{CliValues, resolve_forest};
use crate::registry::FlagRegistry;
use crate::resolution::Resolution;
use crate::result_ext::ArgsResultExt;
use crate::walker::SchemaForest;
use crate::{ArgsResult, ResolverOptions};

pub use builder::RecordArgsBuilder;

/// A validated set of records and auxiliary flags.
#[derive(Debug)]
pub struct RecordArgs {
    name: String,
    about: Option<String>,
    forest: SchemaForest,
    registry: FlagRegistry,
    config_flag: Option<ConfigFlag>,
    specs: Vec<FlagSpec>,
    options: ResolverOptions,
}

impl RecordArgs {
    /// Start registering records and flags.
    #[must_use]
    pub fn builder() -> RecordArgsBuilder {
        RecordArgsBuilder::default()
    }

    /// The clap command carrying every synthesised option.
    ///
    /// A fresh command is built on each call.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.name.clone()).args_override_self(true);
        if let Some(about) = &self.about {
            command = command.about(about.clone());
        }
        if let Some(config) = &self.config_flag {
            command = command.arg(config.to_arg());
        }
        let with_leaves = self
            .specs
            .iter()
            .fold(command, |cmd, spec| cmd.arg(spec.to_arg()));
        self.registry
            .flags()
            .iter()
            .fold(with_leaves, |cmd, flag| cmd.arg(flag.arg().clone()))
    }

    /// Parse `args` (program name first) and resolve every record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ArgsError::CliParsing`] when clap rejects the arguments
    /// (including help and version requests) and any error raised while
    /// loading the configuration file, merging or constructing records.
    pub fn parse_from<I, T>(&self, args: I) -> ArgsResult<Resolution>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command()
            .try_get_matches_from(args)
            .into_args()?;
        self.resolve_matches(&matches)
    }

    /// Parse the process arguments and resolve every record.
    ///
    /// # Errors
    ///
    /// As for [`RecordArgs::parse_from`].
    pub fn parse(&self) -> ArgsResult<Resolution> {
        self.parse_from(std::env::args_os())
    }

    /// Parse the process arguments, exiting with a usage message on error.
    #[must_use]
    pub fn parse_or_exit(&self) -> Resolution {
        crate::boundary::parse_or_exit(self)
    }

    /// Resolve records and flags from matches produced by [`RecordArgs::command`].
    ///
    /// # Errors
    ///
    /// As for [`RecordArgs::parse_from`], minus clap errors.
    pub fn resolve_matches(&self, matches: &ArgMatches) -> ArgsResult<Resolution> {
        let cli = read_cli_values(matches, &self.specs);
        let document = match self.config_path(matches) {
            Some(path) => {
                debug!(path = %path, "loading configuration file");
                Some(load_config_document(&path)?)
            }
            None => None,
        };
        let tree = resolve_forest(&self.forest, &cli, document.as_ref(), self.options)?;
        let flags = self.registry.extract(matches, self.options)?;
        assemble(&self.forest, &tree, flags)
    }

    /// Resolve records from values tokenised elsewhere.
    ///
    /// The result carries no auxiliary flag values. When configuration
    /// loading is disabled, either through
    /// [`RecordArgsBuilder::without_config_flag`] or because a record is
    /// aliased like the config flag's destination, `config` is ignored.
    ///
    /// # Errors
    ///
    /// Returns any error raised while merging or constructing records.
    pub fn resolve(
        &self,
        cli: &CliValues,
        config: Option<&ConfigDocument>,
    ) -> ArgsResult<Resolution> {
        let document = config.filter(|_| self.config_flag.is_some());
        if config.is_some() && document.is_none() {
            debug!("configuration loading is disabled; ignoring the supplied document");
        }
        let tree = resolve_forest(&self.forest, cli, document, self.options)?;
        assemble(&self.forest, &tree, BTreeMap::new())
    }

    /// Option definitions synthesised for the record leaves.
    #[must_use]
    pub fn flag_specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    /// Registered records.
    #[must_use]
    pub const fn forest(&self) -> &SchemaForest {
        &self.forest
    }

    /// Configuration-file option, or `None` when loading is disabled.
    #[must_use]
    pub const fn config_flag(&self) -> Option<&ConfigFlag> {
        self.config_flag.as_ref()
    }

    fn config_path(&self, matches: &ArgMatches) -> Option<Utf8PathBuf> {
        let config = self.config_flag.as_ref()?;
        matches
            .get_one::<String>(&config.dest())
            .map(Utf8PathBuf::from)
    }
}

#[cfg(test)]
mod tests;
