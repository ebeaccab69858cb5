//! Registration of records and flags.

use std::any::Any;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config_flag::ConfigFlag;
use crate::flags::synthesize;
use crate::registry::{CustomFlag, FlagRegistry};
use crate::schema::{Record, RecordSchema};
use crate::walker::{Constructor, SchemaForest};
use crate::{ArgsResult, ResolverOptions};

use super::RecordArgs;

/// Collects records and flags, then validates them as a whole.
///
/// Registration methods check what they can immediately and return the
/// builder for chaining; [`RecordArgsBuilder::build`] re-checks every
/// collision once all registrations are known.
#[derive(Debug)]
pub struct RecordArgsBuilder {
    name: String,
    about: Option<String>,
    forest: SchemaForest,
    registry: FlagRegistry,
    config_flag: Option<ConfigFlag>,
    options: ResolverOptions,
}

impl Default for RecordArgsBuilder {
    fn default() -> Self {
        Self {
            name: "app".to_owned(),
            about: None,
            forest: SchemaForest::default(),
            registry: FlagRegistry::default(),
            config_flag: Some(ConfigFlag::default()),
            options: ResolverOptions::default(),
        }
    }
}

impl RecordArgsBuilder {
    /// Register `T` under its declared record name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ArgsError::ReservedAliasCollision`],
    /// [`crate::ArgsError::DuplicateAlias`] or
    /// [`crate::ArgsError::DuplicatePath`] when the record cannot be added.
    pub fn record<T: Record>(self) -> ArgsResult<Self> {
        let schema = T::schema();
        let alias = schema.name().to_owned();
        self.record_schema::<T>(&alias, schema)
    }

    /// Register `T` under a caller-chosen alias.
    ///
    /// Registering a record as `config` (the configuration flag's
    /// destination) is allowed and turns configuration-file loading off.
    ///
    /// # Errors
    ///
    /// As for [`RecordArgsBuilder::record`].
    pub fn record_as<T: Record>(self, alias: &str) -> ArgsResult<Self> {
        self.record_schema::<T>(alias, T::schema())
    }

    /// Register a hand-built `schema` whose resolved values deserialise into
    /// `T`.
    ///
    /// Use `serde_json::Value` as `T` to keep the raw value tree.
    ///
    /// # Errors
    ///
    /// As for [`RecordArgsBuilder::record`].
    pub fn record_schema<T>(mut self, alias: &str, schema: RecordSchema) -> ArgsResult<Self>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let constructor: Constructor = Arc::new(|value: Value| {
            serde_json::from_value::<T>(value)
                .map(|instance| Box::new(instance) as Box<dyn Any + Send + Sync>)
        });
        self.forest.register(alias, schema, constructor)?;
        Ok(self)
    }

    /// Register an auxiliary flag.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ArgsError::ReservedAliasCollision`] if the flag's
    /// destination or option strings are taken.
    pub fn flag(mut self, flag: CustomFlag) -> ArgsResult<Self> {
        self.registry.register(flag, &self.forest)?;
        Ok(self)
    }

    /// Register several auxiliary flags.
    ///
    /// # Errors
    ///
    /// As for [`RecordArgsBuilder::flag`].
    pub fn flags<I>(self, flags: I) -> ArgsResult<Self>
    where
        I: IntoIterator<Item = CustomFlag>,
    {
        flags.into_iter().try_fold(self, Self::flag)
    }

    /// Replace the configuration-file option.
    #[must_use]
    pub fn config_flag(mut self, flag: ConfigFlag) -> Self {
        self.config_flag = Some(flag);
        self
    }

    /// Turn configuration-file loading off.
    #[must_use]
    pub fn without_config_flag(mut self) -> Self {
        self.config_flag = None;
        self
    }

    /// Set the resolution options.
    #[must_use]
    pub const fn options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Program name shown in usage output.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Description shown in help output.
    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Validate all registrations and freeze the session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ArgsError::ReservedAliasCollision`] when a flag
    /// collides with a record, the configuration flag or `--help`.
    pub fn build(self) -> ArgsResult<RecordArgs> {
        let config_flag = self
            .config_flag
            .filter(|flag| !self.forest.contains(&flag.dest()));
        if config_flag.is_none() {
            debug!("configuration-file loading disabled");
        }
        self.registry.validate(&self.forest, config_flag.as_ref())?;
        let specs = synthesize(&self.forest);
        debug!(options = specs.len(), "synthesised record options");
        Ok(RecordArgs {
            name: self.name,
            about: self.about,
            forest: self.forest,
            registry: self.registry,
            config_flag,
            specs,
            options: self.options,
        })
    }
}
