//! Unit tests for the schema model.

use rstest::rstest;
use serde_json::json;

use super::{DefaultValue, FieldSpec, RecordSchema, ScalarKind, TypeKind};

#[rstest]
#[case::int(TypeKind::int(), "INT")]
#[case::float(TypeKind::float(), "FLOAT")]
#[case::bool(TypeKind::bool(), "BOOL")]
#[case::string(TypeKind::string(), "STRING")]
#[case::choice(TypeKind::choice(["dev", "prod"]), "{dev|prod}")]
#[case::tuple(TypeKind::tuple([TypeKind::int(), TypeKind::int()]), "TUPLE")]
#[case::mapping(TypeKind::map(ScalarKind::Str, TypeKind::int()), "DICT")]
#[case::optional(TypeKind::optional(TypeKind::float()), "FLOAT")]
fn metavar_reflects_kind(#[case] kind: TypeKind, #[case] expected: &str) {
    assert_eq!(kind.metavar(), expected);
}

#[rstest]
fn optional_fields_default_to_null() {
    let field = FieldSpec::new("nickname", TypeKind::optional(TypeKind::string()));
    assert!(!field.is_required());
    assert_eq!(
        field.default_value().materialise().ok().flatten(),
        Some(serde_json::Value::Null)
    );
    assert_eq!(field.default_value().display(), None);
}

#[rstest]
fn fields_without_default_are_required() {
    let field = FieldSpec::new("required", TypeKind::string());
    assert!(field.is_required());
}

#[rstest]
fn factory_defaults_run_on_every_call() {
    let field = FieldSpec::new("tags", TypeKind::list(TypeKind::string()))
        .default_with(|| vec!["a", "b"]);
    let first = field.default_value().materialise().ok().flatten();
    let second = field.default_value().materialise().ok().flatten();
    assert_eq!(first, Some(json!(["a", "b"])));
    assert_eq!(first, second);
    assert_eq!(field.default_value().display().as_deref(), Some(r#"["a","b"]"#));
}

#[rstest]
#[case::string(DefaultValue::Literal(json!("test")), Some("test"))]
#[case::int(DefaultValue::Literal(json!(5)), Some("5"))]
#[case::absent(DefaultValue::Absent, None)]
fn default_display_is_unquoted(#[case] default: DefaultValue, #[case] expected: Option<&str>) {
    assert_eq!(default.display().as_deref(), expected);
}

#[rstest]
fn blank_help_is_dropped() {
    let field = FieldSpec::new("name", TypeKind::string()).help("   ");
    assert_eq!(field.help_text(), None);
}

#[rstest]
fn record_kind_is_configuration_only() {
    let inner = RecordSchema::new("Inner").field(FieldSpec::new("x", TypeKind::int()));
    let nested = TypeKind::list(TypeKind::record(inner));
    assert!(nested.contains_record());
    assert!(!nested.is_cli_settable());
    assert!(TypeKind::list(TypeKind::int()).is_cli_settable());
}
