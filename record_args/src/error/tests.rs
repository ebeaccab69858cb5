//! Unit tests for error classification and message rendering.

use rstest::rstest;

use super::ArgsError;

#[rstest]
fn invalid_choice_lists_allowed_members() {
    let err = ArgsError::InvalidChoice {
        path: "Config.environment".into(),
        value: "qa".into(),
        allowed: vec!["dev".into(), "staging".into(), "prod".into()],
    };
    let message = err.to_string();
    assert!(message.contains("'qa'"), "message: {message}");
    assert!(message.contains("dev, staging, prod"), "message: {message}");
}

#[rstest]
fn length_mismatch_reports_counts() {
    let err = ArgsError::LengthMismatch {
        path: "Config.coords".into(),
        expected: 2,
        actual: 3,
    };
    assert_eq!(
        err.to_string(),
        "invalid tuple for --Config.coords: expected 2 values, got 3"
    );
}

#[rstest]
#[case::missing(ArgsError::missing("A.b"), Some("A.b"))]
#[case::coercion(ArgsError::type_coercion("A.c", "x", "integer"), Some("A.c"))]
#[case::alias(ArgsError::duplicate_alias("A"), None)]
fn path_is_exposed_for_leaf_errors(#[case] err: ArgsError, #[case] expected: Option<&str>) {
    assert_eq!(err.path(), expected);
}
