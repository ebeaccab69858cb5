//! Unit tests for session building and resolution.

use clap::{Arg, ArgAction};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::RecordArgs;
use crate::schema::{FieldSpec, RecordSchema, TypeKind};
use crate::{ArgsError, CliValues, ConfigFlag, CustomFlag, Provenance};

#[fixture]
fn schema() -> RecordSchema {
    RecordSchema::new("Config")
        .field(
            FieldSpec::new("name", TypeKind::string())
                .default("test")
                .help("The name to use"),
        )
        .field(FieldSpec::new("count", TypeKind::int()).default(5))
        .field(FieldSpec::new("required", TypeKind::string()))
}

#[rstest]
fn help_lists_dotted_options(schema: RecordSchema) {
    let args = RecordArgs::builder()
        .record_schema::<Value>("Config", schema)
        .and_then(|builder| builder.build())
        .expect("session");
    let help = args.command().render_help().to_string();
    assert!(help.contains("--Config.name <STRING>"), "help: {help}");
    assert!(help.contains("The name to use (default: test)"), "help: {help}");
    assert!(help.contains("--Config.count <INT>"), "help: {help}");
    assert!(help.contains("--config <FILE>"), "help: {help}");
}

#[rstest]
fn resolve_accepts_external_values(schema: RecordSchema) {
    let args = RecordArgs::builder()
        .record_schema::<Value>("Config", schema)
        .and_then(|builder| builder.build())
        .expect("session");
    let cli: CliValues = [("Config.required", "x")].into_iter().collect();
    let Value::Object(document) = json!({"Config": {"count": 9}}) else {
        panic!("object literal");
    };
    let resolution = args.resolve(&cli, Some(&document)).expect("resolves");
    assert_eq!(
        resolution.value("Config"),
        Some(&json!({"name": "test", "count": 9, "required": "x"}))
    );
    assert_eq!(resolution.provenance("Config.count"), Some(Provenance::Config));
    assert_eq!(resolution.aliases().collect::<Vec<_>>(), ["Config"]);
}

#[rstest]
fn resolve_ignores_documents_when_loading_is_disabled(schema: RecordSchema) {
    let args = RecordArgs::builder()
        .without_config_flag()
        .record_schema::<Value>("Config", schema)
        .and_then(|builder| builder.build())
        .expect("session");
    let cli: CliValues = [("Config.required", "x")].into_iter().collect();
    let Value::Object(document) = json!({"Config": {"count": 9}}) else {
        panic!("object literal");
    };
    let resolution = args.resolve(&cli, Some(&document)).expect("resolves");
    assert_eq!(
        resolution.value("Config").and_then(|value| value.get("count")),
        Some(&json!(5))
    );
    assert_eq!(resolution.provenance("Config.count"), Some(Provenance::Default));
}

#[rstest]
fn config_alias_disables_file_loading(schema: RecordSchema) {
    let args = RecordArgs::builder()
        .record_schema::<Value>("config", schema)
        .and_then(|builder| builder.build())
        .expect("config is a permitted alias");
    assert!(args.config_flag().is_none());
    let resolution = args
        .parse_from(["prog", "--config.required", "r"])
        .expect("resolves");
    assert_eq!(
        resolution.value("config").and_then(|value| value.get("required")),
        Some(&json!("r"))
    );
}

#[rstest]
fn custom_config_flag_is_used(schema: RecordSchema) {
    let args = RecordArgs::builder()
        .config_flag(ConfigFlag::long("settings").short('s'))
        .record_schema::<Value>("Config", schema)
        .and_then(|builder| builder.build())
        .expect("session");
    let help = args.command().render_help().to_string();
    assert!(help.contains("-s, --settings <FILE>"), "help: {help}");
    assert!(!help.contains("--config <FILE>"), "help: {help}");
}

#[rstest]
fn flags_registered_before_records_are_validated(schema: RecordSchema) {
    let err = RecordArgs::builder()
        .flag(CustomFlag::new(Arg::new("Config").long("cfg-mode")))
        .and_then(|builder| builder.record_schema::<Value>("Config", schema))
        .and_then(|builder| builder.build())
        .expect_err("flag destination equals alias");
    assert!(matches!(&*err, ArgsError::DuplicateAlias { alias } if alias == "Config"));
}

#[rstest]
fn flag_values_sit_beside_records(schema: RecordSchema) {
    let args = RecordArgs::builder()
        .record_schema::<Value>("Config", schema)
        .and_then(|builder| {
            builder.flag(CustomFlag::new(
                Arg::new("verbose").long("verbose").action(ArgAction::SetTrue),
            ))
        })
        .and_then(|builder| builder.build())
        .expect("session");
    let resolution = args
        .parse_from(["prog", "--verbose", "--Config.required", "r"])
        .expect("resolves");
    assert_eq!(resolution.flag("verbose"), Some(&json!(true)));
    assert!(resolution.flag("Config.required").is_none());
}

#[rstest]
fn last_occurrence_wins(schema: RecordSchema) {
    let args = RecordArgs::builder()
        .record_schema::<Value>("Config", schema)
        .and_then(|builder| builder.build())
        .expect("session");
    let resolution = args
        .parse_from(["prog", "--Config.required", "a", "--Config.required", "b"])
        .expect("resolves");
    assert_eq!(
        resolution.value("Config").and_then(|value| value.get("required")),
        Some(&json!("b"))
    );
}

#[rstest]
fn help_request_is_a_display_error(schema: RecordSchema) {
    let args = RecordArgs::builder()
        .record_schema::<Value>("Config", schema)
        .and_then(|builder| builder.build())
        .expect("session");
    let err = args.parse_from(["prog", "--help"]).expect_err("help exits");
    match &*err {
        ArgsError::CliParsing(clap_err) => assert!(crate::is_display_request(clap_err)),
        other => panic!("unexpected error: {other}"),
    }
}
