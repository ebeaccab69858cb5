//! Procedural macros for `record_args`.
//!
//! `#[derive(Record)]` describes a struct's fields as a
//! `record_args::schema::RecordSchema`. Field types map to kinds as follows:
//!
//! - integer primitives to `int`, `f32`/`f64` to `float`, `bool` to `bool`;
//! - `String`, `PathBuf` and `Utf8PathBuf` to `string`;
//! - `Vec<T>` to a sequence, tuples to a fixed tuple and `HashMap`/`BTreeMap`
//!   to a mapping;
//! - `Option<T>` to an optional kind defaulting to `None`;
//! - any other named type to a nested record, which must itself derive
//!   `Record`.
//!
//! Struct attributes: `#[record(name = "...")]` overrides the record name
//! and `#[record(crate = "...")]` names an aliased `record_args`
//! dependency. Field attributes: `#[record(default = expr)]`,
//! `#[record(choices("a", "b"))]` and `#[record(help = "...")]`, with doc
//! comments as the fallback help text. `#[serde(default)]`,
//! `#[serde(rename)]`, `#[serde(rename_all)]` and `#[serde(skip)]` are
//! honoured.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `record_args::Record`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
