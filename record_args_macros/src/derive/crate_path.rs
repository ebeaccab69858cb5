//! Path under which generated code reaches `record_args`.

use proc_macro2::TokenStream;
use quote::quote;

/// Tokens naming the runtime crate.
///
/// Defaults to `::record_args`; `#[record(crate = "...")]` substitutes an
/// aliased dependency name.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::record_args }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::resolve;

    #[rstest]
    #[case::default(None, ":: record_args")]
    #[case::custom(Some("my_alias"), "my_alias")]
    #[case::nested(Some("deps::record_args"), "deps :: record_args")]
    fn resolve_produces_expected_tokens(#[case] input: Option<&str>, #[case] expected: &str) {
        let parsed = input.map(|s| syn::parse_str::<syn::Path>(s).expect("valid path"));
        assert_eq!(resolve(parsed.as_ref()).to_string(), expected);
    }
}
