//! Static description of record types.
//!
//! A [`RecordSchema`] lists the fields of one record type in declaration
//! order. Schemas are produced by `#[derive(Record)]` or assembled by hand
//! with the builder methods on [`RecordSchema`] and [`FieldSpec`], and are
//! immutable once registered with a [`crate::RecordArgs`] session.
//!
//! ```
//! use record_args::schema::{FieldSpec, RecordSchema, TypeKind};
//!
//! let schema = RecordSchema::new("Config")
//!     .field(FieldSpec::new("name", TypeKind::string()).default("test"))
//!     .field(FieldSpec::new("count", TypeKind::int()).default(5))
//!     .field(FieldSpec::new("required", TypeKind::string()));
//! assert_eq!(schema.fields().len(), 3);
//! assert!(schema.fields()[2].is_required());
//! ```

mod default;
mod descriptor;
mod field;
mod kind;
mod record;

pub use default::DefaultValue;
pub use descriptor::FieldDescriptor;
pub use field::FieldSpec;
pub use kind::{ScalarKind, TypeKind};
pub use record::{Record, RecordSchema};

#[cfg(test)]
mod tests;
