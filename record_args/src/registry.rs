//! Auxiliary flags that sit beside the record options.

use std::collections::BTreeMap;
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches};
use serde_json::Value;
use tracing::debug;

use crate::coerce::coerce_text;
use crate::config_flag::ConfigFlag;
use crate::schema::TypeKind;
use crate::walker::SchemaForest;
use crate::{ArgsError, ArgsResult, ResolverOptions};

/// A non-schema flag forwarded to clap as-is.
///
/// The flag's value appears in the resolution under its destination, the
/// clap argument id.
///
/// ```
/// use clap::{Arg, ArgAction};
/// use record_args::CustomFlag;
///
/// let verbose = CustomFlag::new(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue));
/// assert_eq!(verbose.dest(), "verbose");
/// ```
#[derive(Clone, Debug)]
pub struct CustomFlag {
    arg: Arg,
    kind: Option<TypeKind>,
}

impl CustomFlag {
    /// Wrap a clap argument.
    #[must_use]
    pub const fn new(arg: Arg) -> Self {
        Self { arg, kind: None }
    }

    /// Coerce the flag's raw value through `kind`.
    #[must_use]
    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Destination name of the flag's value.
    #[must_use]
    pub fn dest(&self) -> &str {
        self.arg.get_id().as_str()
    }

    /// The wrapped clap argument.
    #[must_use]
    pub const fn arg(&self) -> &Arg {
        &self.arg
    }

    /// Option strings, such as `--verbose` and `-v`, the flag answers to.
    #[must_use]
    pub fn option_strings(&self) -> Vec<String> {
        let longs = self
            .arg
            .get_long_and_visible_aliases()
            .into_iter()
            .flatten()
            .map(|long| format!("--{long}"));
        let shorts = self
            .arg
            .get_short_and_visible_aliases()
            .into_iter()
            .flatten()
            .map(|short| format!("-{short}"));
        longs.chain(shorts).collect()
    }

    fn read(&self, matches: &ArgMatches, options: ResolverOptions) -> ArgsResult<Value> {
        let id = self.dest();
        match self.arg.get_action() {
            ArgAction::SetTrue | ArgAction::SetFalse => Ok(matches
                .try_get_one::<bool>(id)
                .ok()
                .flatten()
                .map_or(Value::Null, |flag| Value::Bool(*flag))),
            ArgAction::Count => Ok(matches
                .try_get_one::<u8>(id)
                .ok()
                .flatten()
                .map_or(Value::Null, |count| Value::from(*count))),
            ArgAction::Append => match self.raw_values(matches) {
                None => Ok(Value::Null),
                Some(raws) => raws
                    .iter()
                    .map(|raw| self.convert(raw, options))
                    .collect::<ArgsResult<Vec<_>>>()
                    .map(Value::Array),
            },
            _ => match self.raw_values(matches).and_then(|raws| raws.into_iter().next()) {
                None => Ok(Value::Null),
                Some(raw) => self.convert(&raw, options),
            },
        }
    }

    fn raw_values(&self, matches: &ArgMatches) -> Option<Vec<String>> {
        let raws = matches.try_get_raw(self.dest()).ok().flatten()?;
        Some(
            raws.map(|raw| raw.to_string_lossy().into_owned())
                .collect(),
        )
    }

    fn convert(&self, raw: &str, options: ResolverOptions) -> ArgsResult<Value> {
        match &self.kind {
            Some(kind) => coerce_text(raw, kind, self.dest(), options),
            None => Ok(Value::String(raw.to_owned())),
        }
    }
}

/// Auxiliary flags in registration order.
#[derive(Clone, Debug, Default)]
pub struct FlagRegistry {
    flags: Vec<CustomFlag>,
}

impl FlagRegistry {
    /// Add `flag`, checking it against the flags and records registered so
    /// far.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::DuplicateAlias`] if the destination is a record
    /// alias and [`ArgsError::ReservedAliasCollision`] if it is dotted, names
    /// a record field, or it or an option string is already taken by another
    /// flag.
    pub fn register(&mut self, flag: CustomFlag, forest: &SchemaForest) -> ArgsResult<()> {
        self.check(&flag, forest)?;
        debug!(dest = flag.dest(), "registered auxiliary flag");
        self.flags.push(flag);
        Ok(())
    }

    /// Registered flags.
    #[must_use]
    pub fn flags(&self) -> &[CustomFlag] {
        &self.flags
    }

    /// Re-check every flag once all registrations are known.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::DuplicateAlias`] when a destination equals a
    /// record alias and [`ArgsError::ReservedAliasCollision`] when it equals
    /// the config flag's destination or an option string shadows a record
    /// option, the config flag or `--help`.
    pub fn validate(&self, forest: &SchemaForest, config: Option<&ConfigFlag>) -> ArgsResult<()> {
        for (idx, flag) in self.flags.iter().enumerate() {
            let earlier = Self {
                flags: self.flags.iter().take(idx).cloned().collect(),
            };
            earlier.check(flag, forest)?;
            if let Some(config_flag) = config {
                if flag.dest() == config_flag.dest() {
                    return Err(Arc::new(ArgsError::reserved(
                        flag.dest(),
                        "destination is used by the configuration file flag",
                    )));
                }
                if let Some(taken) = flag
                    .option_strings()
                    .into_iter()
                    .find(|option| config_flag.option_strings().contains(option))
                {
                    return Err(Arc::new(ArgsError::reserved(
                        taken,
                        "option is used by the configuration file flag",
                    )));
                }
            }
            for option in flag.option_strings() {
                let shadows_leaf = forest
                    .leaves()
                    .any(|leaf| leaf.option_name() == option);
                if shadows_leaf || option == "--help" || option == "-h" {
                    return Err(Arc::new(ArgsError::reserved(
                        option,
                        "option is already defined",
                    )));
                }
            }
        }
        Ok(())
    }

    /// Read every flag's value from `matches`.
    ///
    /// # Errors
    ///
    /// Fails when a flag with a declared kind has a value that does not
    /// coerce.
    pub fn extract(
        &self,
        matches: &ArgMatches,
        options: ResolverOptions,
    ) -> ArgsResult<BTreeMap<String, Value>> {
        self.flags
            .iter()
            .map(|flag| Ok((flag.dest().to_owned(), flag.read(matches, options)?)))
            .collect()
    }

    fn check(&self, flag: &CustomFlag, forest: &SchemaForest) -> ArgsResult<()> {
        if forest.contains(flag.dest()) {
            return Err(Arc::new(ArgsError::duplicate_alias(flag.dest())));
        }
        if forest.leaves().any(|leaf| leaf.path() == flag.dest()) {
            return Err(Arc::new(ArgsError::reserved(
                flag.dest(),
                "destination is the dotted path of a record field",
            )));
        }
        if flag.dest().contains('.') {
            return Err(Arc::new(ArgsError::reserved(
                flag.dest(),
                "destinations cannot contain '.'",
            )));
        }
        if self.flags.iter().any(|other| other.dest() == flag.dest()) {
            return Err(Arc::new(ArgsError::reserved(
                flag.dest(),
                "destination is already used by another flag",
            )));
        }
        let taken: Vec<String> = self
            .flags
            .iter()
            .flat_map(CustomFlag::option_strings)
            .collect();
        match flag
            .option_strings()
            .into_iter()
            .find(|option| taken.contains(option))
        {
            Some(option) => Err(Arc::new(ArgsError::reserved(
                option,
                "option is already used by another flag",
            ))),
            None => Ok(()),
        }
    }
}
