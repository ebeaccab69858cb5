//! The result of one resolution call.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::merge::Provenance;
use crate::result_ext::JsonResultExt;
use crate::{ArgsError, ArgsResult};

/// Record instances and auxiliary flag values produced by one call.
///
/// ```
/// use record_args::{RecordArgs, Record};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize, Record)]
/// struct Config {
///     #[record(default = 5)]
///     count: i64,
/// }
///
/// let args = RecordArgs::builder().record::<Config>()?.build()?;
/// let resolution = args.parse_from(["prog", "--Config.count", "7"])?;
/// assert_eq!(resolution.get::<Config>("Config").map(|c| c.count), Some(7));
/// # Ok::<(), std::sync::Arc<record_args::ArgsError>>(())
/// ```
#[derive(Debug, Default)]
pub struct Resolution {
    order: Vec<String>,
    records: HashMap<String, Box<dyn Any + Send + Sync>>,
    values: HashMap<String, Value>,
    flags: BTreeMap<String, Value>,
    provenance: HashMap<String, Provenance>,
}

impl Resolution {
    pub(crate) fn insert_record(
        &mut self,
        alias: &str,
        instance: Box<dyn Any + Send + Sync>,
        value: Value,
    ) {
        self.order.push(alias.to_owned());
        self.records.insert(alias.to_owned(), instance);
        self.values.insert(alias.to_owned(), value);
    }

    pub(crate) fn insert_provenance(&mut self, path: &str, provenance: Provenance) {
        self.provenance.insert(path.to_owned(), provenance);
    }

    pub(crate) fn set_flags(&mut self, flags: BTreeMap<String, Value>) -> ArgsResult<()> {
        if let Some(dest) = flags.keys().find(|dest| self.values.contains_key(dest.as_str())) {
            return Err(Arc::new(ArgsError::duplicate_alias(dest.as_str())));
        }
        self.flags = flags;
        Ok(())
    }

    /// Borrow the record registered under `alias`.
    ///
    /// Returns `None` if no record has that alias or it is not a `T`.
    #[must_use]
    pub fn get<T: Any>(&self, alias: &str) -> Option<&T> {
        self.records.get(alias)?.downcast_ref()
    }

    /// Move the record registered under `alias` out of the resolution.
    ///
    /// The record stays in place when it is not a `T`.
    pub fn take<T: Any>(&mut self, alias: &str) -> Option<T> {
        let boxed = self.records.remove(alias)?;
        match boxed.downcast::<T>() {
            Ok(instance) => Some(*instance),
            Err(original) => {
                self.records.insert(alias.to_owned(), original);
                None
            }
        }
    }

    /// Assembled value tree the record under `alias` was built from.
    #[must_use]
    pub fn value(&self, alias: &str) -> Option<&Value> {
        self.values.get(alias)
    }

    /// Value of the auxiliary flag stored under `dest`.
    #[must_use]
    pub fn flag(&self, dest: &str) -> Option<&Value> {
        self.flags.get(dest)
    }

    /// Deserialise the auxiliary flag stored under `dest`.
    ///
    /// Unknown destinations and flags left off the command line, stored as
    /// `null`, both yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::Construction`] when the value does not
    /// deserialise into `T`.
    pub fn flag_as<T: DeserializeOwned>(&self, dest: &str) -> ArgsResult<Option<T>> {
        self.flags
            .get(dest)
            .filter(|value| !value.is_null())
            .map(|value| serde_json::from_value(value.clone()).or_construction(dest))
            .transpose()
    }

    /// All auxiliary flag values keyed by destination.
    #[must_use]
    pub const fn flags(&self) -> &BTreeMap<String, Value> {
        &self.flags
    }

    /// Source of the value resolved for the leaf at `path`.
    #[must_use]
    pub fn provenance(&self, path: &str) -> Option<Provenance> {
        self.provenance.get(path).copied()
    }

    /// Aliases of the constructed records in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;
    use serde_json::{Value, json};

    use super::Resolution;
    use crate::ArgsError;

    #[rstest]
    fn wrong_type_leaves_record_in_place() {
        let mut resolution = Resolution::default();
        resolution.insert_record("A", Box::new(5_i64), json!({}));
        assert_eq!(resolution.take::<String>("A"), None);
        assert_eq!(resolution.get::<i64>("A"), Some(&5));
        assert_eq!(resolution.take::<i64>("A"), Some(5));
        assert_eq!(resolution.get::<i64>("A"), None);
    }

    #[rstest]
    fn flag_named_like_record_is_duplicate() {
        let mut resolution = Resolution::default();
        resolution.insert_record("A", Box::new(()), json!({}));
        let flags = BTreeMap::from([("A".to_owned(), json!(true))]);
        let err = resolution.set_flags(flags).expect_err("collision");
        assert!(matches!(&*err, ArgsError::DuplicateAlias { alias } if alias == "A"));
    }

    #[rstest]
    fn flags_deserialise_on_request() {
        let mut resolution = Resolution::default();
        let flags = BTreeMap::from([("tags".to_owned(), json!(["a", "b"]))]);
        resolution.set_flags(flags).expect("no collision");
        let tags: Option<Vec<String>> = resolution.flag_as("tags").expect("strings");
        assert_eq!(tags, Some(vec!["a".to_owned(), "b".to_owned()]));
        assert!(resolution.flag_as::<u32>("tags").is_err());
        assert_eq!(resolution.flag_as::<u32>("absent").ok(), Some(None));
    }

    #[rstest]
    fn omitted_typed_flag_reads_as_none() {
        let mut resolution = Resolution::default();
        let flags = BTreeMap::from([("times".to_owned(), Value::Null)]);
        resolution.set_flags(flags).expect("no collision");
        assert_eq!(resolution.flag("times"), Some(&Value::Null));
        let times: Option<u8> = resolution.flag_as("times").expect("null is absent");
        assert_eq!(times, None);
    }
}
