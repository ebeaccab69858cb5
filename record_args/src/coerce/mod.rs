//! Conversion of raw text and configuration nodes into typed values.
//!
//! Every conversion either yields a value that matches the field's
//! [`TypeKind`](crate::schema::TypeKind) or fails with an error naming the
//! field's dotted path. Values are represented as [`serde_json::Value`] so
//! the assembled tree can be deserialised into the record type.

mod node;
mod text;

pub use node::conform_node;
pub use text::coerce_text;
