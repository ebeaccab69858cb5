//! Expansion of `#[derive(Record)]`.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parse `input` and generate its `Record` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let record = parse::parse_input(input)?;
    generate::record_impl(&record)
}
