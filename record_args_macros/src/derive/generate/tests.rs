//! Tests for `Record` code generation.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, Type, parse_quote};

use super::kind::{Container, Scalar, container_of, kind_tokens, optional_inner, scalar_of};
use crate::derive::expand;

fn expanded(input: &DeriveInput) -> Result<String> {
    expand(input)
        .map(|tokens| tokens.to_string())
        .map_err(|err| anyhow!("expansion failed: {err}"))
}

fn expansion_error(input: &DeriveInput) -> Result<String> {
    match expand(input) {
        Ok(tokens) => Err(anyhow!("expected expansion to fail, got {tokens}")),
        Err(err) => Ok(err.to_string()),
    }
}

#[rstest]
#[case::int(parse_quote!(u16), Some(Scalar::Int))]
#[case::isize(parse_quote!(isize), Some(Scalar::Int))]
#[case::float(parse_quote!(f32), Some(Scalar::Float))]
#[case::boolean(parse_quote!(bool), Some(Scalar::Bool))]
#[case::string(parse_quote!(String), Some(Scalar::Str))]
#[case::path(parse_quote!(std::path::PathBuf), Some(Scalar::Str))]
#[case::utf8_path(parse_quote!(camino::Utf8PathBuf), Some(Scalar::Str))]
#[case::vec(parse_quote!(Vec<u8>), None)]
#[case::record(parse_quote!(Server), None)]
fn classifies_scalars(#[case] ty: Type, #[case] expected: Option<Scalar>) {
    assert_eq!(scalar_of(&ty), expected);
}

#[rstest]
#[case::optional(parse_quote!(Option<i64>), "TypeKind :: optional")]
#[case::list(parse_quote!(Vec<String>), "TypeKind :: list")]
#[case::map(parse_quote!(HashMap<String, f64>), "TypeKind :: map")]
#[case::btree(parse_quote!(BTreeMap<i32, bool>), "ScalarKind :: Int")]
#[case::tuple(parse_quote!((i64, String)), "TypeKind :: tuple")]
#[case::record(parse_quote!(Point), "< Point as :: record_args :: Record > :: schema ()")]
fn maps_types_to_kinds(#[case] ty: Type, #[case] fragment: &str) -> Result<()> {
    let krate = quote::quote! { ::record_args };
    let tokens = kind_tokens(&ty, &krate)
        .map_err(|err| anyhow!("kind mapping failed: {err}"))?
        .to_string();
    ensure!(tokens.contains(fragment), "{fragment} missing from {tokens}");
    Ok(())
}

#[rstest]
fn containers_ignore_module_prefixes() -> Result<()> {
    let ty: Type = parse_quote!(std::collections::BTreeMap<String, alloc::vec::Vec<Limits>>);
    let Some(Container::Mapping(key, value)) = container_of(&ty) else {
        return Err(anyhow!("expected a mapping"));
    };
    ensure!(scalar_of(key) == Some(Scalar::Str));
    let expected: Type = parse_quote!(Limits);
    ensure!(container_of(value) == Some(Container::Sequence(&expected)));
    Ok(())
}

#[rstest]
#[case::bare(parse_quote!(Vec))]
#[case::wrong_arity(parse_quote!(HashMap<String>))]
#[case::set(parse_quote!(HashSet<String>))]
#[case::record(parse_quote!(Limits<u8>))]
fn other_generics_are_not_containers(#[case] ty: Type) {
    assert_eq!(container_of(&ty), None);
}

#[rstest]
fn only_the_outer_option_is_unwrapped() {
    let ty: Type = parse_quote!(core::option::Option<Option<u8>>);
    let inner: Type = parse_quote!(Option<u8>);
    assert_eq!(optional_inner(&ty), Some(&inner));
    let list: Type = parse_quote!(Vec<Option<u8>>);
    assert_eq!(optional_inner(&list), None);
}

#[rstest]
fn nested_containers_wrap_record_kinds_in_order() -> Result<()> {
    let ty: Type = parse_quote!(Option<Vec<Limits>>);
    let krate = quote::quote! { ::record_args };
    let tokens = kind_tokens(&ty, &krate)
        .map_err(|err| anyhow!("kind mapping failed: {err}"))?
        .to_string();
    let positions = ["TypeKind :: optional", "TypeKind :: list", "< Limits as"]
        .map(|fragment| tokens.find(fragment));
    let [Some(optional), Some(list), Some(record)] = positions else {
        return Err(anyhow!("fragments missing from {tokens}"));
    };
    ensure!(optional < list && list < record, "unexpected nesting: {tokens}");
    Ok(())
}

#[rstest]
fn rejects_non_scalar_map_keys() {
    let ty: Type = parse_quote!(HashMap<Vec<u8>, String>);
    let krate = quote::quote! { ::record_args };
    let err = kind_tokens(&ty, &krate).err().map(|err| err.to_string());
    assert_eq!(
        err.as_deref(),
        Some("mapping keys must be integers, floats, booleans or strings")
    );
}

#[rstest]
fn generates_schema_with_defaults_and_help() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Config {
            /// The name to use
            #[record(default = "test")]
            name: String,
            #[record(default = 5, help = "How many")]
            count: i64,
            required: String,
        }
    };
    let tokens = expanded(&input)?;
    ensure!(tokens.contains("impl :: record_args :: Record for Config"));
    ensure!(tokens.contains("RecordSchema :: new (\"Config\")"));
    ensure!(tokens.contains("FieldSpec :: new (\"name\""));
    ensure!(tokens.contains(". help (\"The name to use\")"));
    ensure!(tokens.contains(". help (\"How many\")"));
    ensure!(tokens.contains("let value : i64 = 5"));
    ensure!(tokens.contains("FieldSpec :: new (\"required\""));
    Ok(())
}

#[rstest]
fn honours_serde_renames_and_skip() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[serde(rename_all = "kebab-case")]
        struct Config {
            log_level: String,
            #[serde(rename = "svc")]
            service_name: String,
            #[serde(skip)]
            cache: Vec<u8>,
        }
    };
    let tokens = expanded(&input)?;
    ensure!(tokens.contains("\"log-level\""), "tokens: {tokens}");
    ensure!(tokens.contains("\"svc\""), "tokens: {tokens}");
    ensure!(!tokens.contains("cache"), "tokens: {tokens}");
    Ok(())
}

#[rstest]
fn serde_defaults_become_factories() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[serde(default)]
        struct Limits {
            #[serde(default = "default_depth")]
            depth: u32,
            width: u32,
        }
    };
    let tokens = expanded(&input)?;
    ensure!(tokens.contains("default_depth ()"), "tokens: {tokens}");
    ensure!(
        tokens.contains("< Limits as :: core :: default :: Default > :: default () . width"),
        "tokens: {tokens}"
    );
    Ok(())
}

#[rstest]
fn struct_attributes_override_name_and_crate() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[record(name = "Server", crate = "args")]
        struct ServerArgs {
            #[record(choices("dev", "prod"))]
            env: Option<String>,
        }
    };
    let tokens = expanded(&input)?;
    ensure!(tokens.contains("impl args :: Record for ServerArgs"));
    ensure!(tokens.contains("RecordSchema :: new (\"Server\")"));
    ensure!(tokens.contains("TypeKind :: choice ([\"dev\" , \"prod\"])"), "tokens: {tokens}");
    Ok(())
}

#[rstest]
#[case::tuple_struct(parse_quote! { struct Pair(i64, i64); }, "Record requires named fields")]
#[case::enumeration(parse_quote! { enum Mode { A } }, "Record can only be derived for structs")]
#[case::generic(
    parse_quote! { struct Wrapper<T> { inner: T } },
    "Record cannot be derived for generic structs"
)]
#[case::unknown_field_key(
    parse_quote! { struct C { #[record(cli_long = "x")] x: i64 } },
    "unknown field attribute `cli_long`"
)]
#[case::bad_choice_type(
    parse_quote! { struct C { #[record(choices("a"))] x: i64 } },
    "choices require a String or Option<String> field"
)]
#[case::dotted_name(
    parse_quote! { #[record(name = "a.b")] struct C { x: i64 } },
    "record name must be non-empty and must not contain '.'"
)]
fn rejects_invalid_input(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let err = expansion_error(&input)?;
    ensure!(err == message, "unexpected error: {err}");
    Ok(())
}
