//! Construction of record instances from the resolved tree.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::merge::ResolvedTree;
use crate::resolution::Resolution;
use crate::walker::SchemaForest;
use crate::ArgsResult;

/// Build every record in `tree` and attach the auxiliary `flags`.
///
/// Nested records are assembled before the records that contain them.
/// Nothing is returned unless every record constructs.
///
/// # Errors
///
/// Returns [`crate::ArgsError::Construction`] when an assembled value does
/// not deserialise into its record type, and
/// [`crate::ArgsError::DuplicateAlias`] when a flag destination equals a
/// record alias.
pub fn assemble(
    forest: &SchemaForest,
    tree: &ResolvedTree,
    flags: BTreeMap<String, Value>,
) -> ArgsResult<Resolution> {
    let mut resolution = Resolution::default();
    for (entry, record) in forest.entries().iter().zip(tree.records()) {
        let value = record.to_value();
        let instance = entry.construct(value.clone())?;
        debug!(alias = entry.alias(), "constructed record");
        resolution.insert_record(entry.alias(), instance, value);
    }
    for leaf in tree.leaves() {
        resolution.insert_provenance(leaf.path(), leaf.provenance());
    }
    resolution.set_flags(flags)?;
    Ok(resolution)
}
