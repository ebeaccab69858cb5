//! Layering of command-line values over configuration files and defaults.

use anyhow::{Result, anyhow, ensure};
use record_args::{
    ArgsError, Provenance, Record, RecordArgs, ResolverOptions, UnknownKeyPolicy,
};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};
use test_helpers::argv::{argv, argv_with_config};
use test_helpers::config::ConfigDir;

#[derive(Debug, Deserialize, Record)]
struct Config {
    #[record(default = "test")]
    name: String,
    #[record(default = 5)]
    count: i64,
    required: String,
}

#[derive(Debug, Deserialize, Serialize, Record, PartialEq)]
struct Point {
    #[record(default = 0)]
    x: i64,
    #[record(default = 0)]
    y: i64,
    #[record(default = "origin")]
    label: String,
}

#[derive(Debug, Deserialize, Record)]
struct Outer {
    inner: Point,
    #[record(default = Vec::new())]
    waypoints: Vec<Point>,
    #[record(default = true)]
    enabled: bool,
}

#[fixture]
fn dir() -> ConfigDir {
    ConfigDir::new().expect("temporary config directory")
}

fn session<T: Record>() -> Result<RecordArgs> {
    RecordArgs::builder()
        .record::<T>()
        .and_then(|builder| builder.build())
        .map_err(|err| anyhow!("session: {err}"))
}

#[rstest]
fn command_line_beats_configuration(dir: ConfigDir) -> Result<()> {
    let path = dir.write("settings.json", r#"{"Config": {"count": 100}}"#)?;
    let args = session::<Config>()?;
    let resolution = args
        .parse_from(argv_with_config(
            ["--Config.count", "200", "--Config.required", "x"],
            &path,
        ))
        .map_err(|err| anyhow!("{err}"))?;
    let config = resolution
        .get::<Config>("Config")
        .ok_or_else(|| anyhow!("Config missing"))?;
    ensure!(config.count == 200);
    ensure!(config.required == "x");
    ensure!(config.name == "test");
    Ok(())
}

#[rstest]
fn configuration_fills_unsupplied_leaves(dir: ConfigDir) -> Result<()> {
    let path = dir.write(
        "settings.json",
        r#"{"Config": {"count": 100, "required": "from-file"}, "Unrelated": {"a": 1}}"#,
    )?;
    let args = session::<Config>()?;
    let resolution = args
        .parse_from(argv_with_config(Vec::<String>::new(), &path))
        .map_err(|err| anyhow!("{err}"))?;
    let config = resolution
        .get::<Config>("Config")
        .ok_or_else(|| anyhow!("Config missing"))?;
    ensure!(config.count == 100);
    ensure!(config.required == "from-file");
    ensure!(resolution.provenance("Config.count") == Some(Provenance::Config));
    ensure!(resolution.provenance("Config.name") == Some(Provenance::Default));
    Ok(())
}

#[rstest]
fn configuration_strings_are_coerced(dir: ConfigDir) -> Result<()> {
    let path = dir.write(
        "settings.json",
        r#"{"Config": {"count": "42", "required": 7}}"#,
    )?;
    let args = session::<Config>()?;
    let resolution = args
        .parse_from(argv_with_config(Vec::<String>::new(), &path))
        .map_err(|err| anyhow!("{err}"))?;
    let config = resolution
        .get::<Config>("Config")
        .ok_or_else(|| anyhow!("Config missing"))?;
    ensure!(config.count == 42);
    ensure!(config.required == "7");
    Ok(())
}

#[rstest]
fn nested_override_keeps_siblings(dir: ConfigDir) -> Result<()> {
    let path = dir.write(
        "settings.json",
        r#"{"Outer": {"inner": {"x": 1, "y": 2}}}"#,
    )?;
    let args = session::<Outer>()?;
    let resolution = args
        .parse_from(argv_with_config(["--Outer.inner.x", "9"], &path))
        .map_err(|err| anyhow!("{err}"))?;
    let outer = resolution
        .get::<Outer>("Outer")
        .ok_or_else(|| anyhow!("Outer missing"))?;
    ensure!(
        outer.inner
            == Point {
                x: 9,
                y: 2,
                label: "origin".to_owned(),
            },
        "inner: {:?}",
        outer.inner
    );
    ensure!(outer.enabled);
    ensure!(outer.waypoints.is_empty());
    ensure!(resolution.provenance("Outer.inner.x") == Some(Provenance::Cli));
    ensure!(resolution.provenance("Outer.inner.y") == Some(Provenance::Config));
    ensure!(resolution.provenance("Outer.inner.label") == Some(Provenance::Default));
    Ok(())
}

#[rstest]
fn record_lists_come_from_configuration(dir: ConfigDir) -> Result<()> {
    let path = dir.write(
        "settings.json",
        r#"{"Outer": {"waypoints": [{"x": 1}, {"y": 2, "label": "b"}]}}"#,
    )?;
    let args = session::<Outer>()?;
    let help = args.command().render_help().to_string();
    ensure!(!help.contains("--Outer.waypoints"), "help: {help}");
    let resolution = args
        .parse_from(argv_with_config(Vec::<String>::new(), &path))
        .map_err(|err| anyhow!("{err}"))?;
    let outer = resolution
        .get::<Outer>("Outer")
        .ok_or_else(|| anyhow!("Outer missing"))?;
    let labels: Vec<&str> = outer.waypoints.iter().map(|p| p.label.as_str()).collect();
    ensure!(labels == ["origin", "b"], "labels: {labels:?}");
    ensure!(outer.waypoints.first().map(|p| (p.x, p.y)) == Some((1, 0)));
    ensure!(outer.waypoints.get(1).map(|p| (p.x, p.y)) == Some((0, 2)));
    Ok(())
}

#[rstest]
fn missing_configuration_file_is_reported(dir: ConfigDir) -> Result<()> {
    let args = session::<Config>()?;
    let err = args
        .parse_from(argv_with_config(
            ["--Config.required", "x"],
            &dir.path("absent.json"),
        ))
        .err()
        .ok_or_else(|| anyhow!("expected a missing file to fail"))?;
    ensure!(matches!(err.as_ref(), ArgsError::ConfigFile { .. }), "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn configuration_is_optional() -> Result<()> {
    let args = session::<Config>()?;
    let resolution = args
        .parse_from(argv(["--Config.required", "x"]))
        .map_err(|err| anyhow!("{err}"))?;
    ensure!(resolution.get::<Config>("Config").is_some());
    Ok(())
}

#[rstest]
#[case::ignore(UnknownKeyPolicy::Ignore, true)]
#[case::reject(UnknownKeyPolicy::Reject, false)]
fn unknown_subtree_keys_follow_policy(
    dir: ConfigDir,
    #[case] policy: UnknownKeyPolicy,
    #[case] succeeds: bool,
) -> Result<()> {
    let path = dir.write(
        "settings.json",
        r#"{"Config": {"required": "x", "colour": "blue"}}"#,
    )?;
    let args = RecordArgs::builder()
        .options(ResolverOptions::default().unknown_keys(policy))
        .record::<Config>()
        .and_then(|builder| builder.build())
        .map_err(|err| anyhow!("{err}"))?;
    let outcome = args.parse_from(argv_with_config(Vec::<String>::new(), &path));
    match outcome {
        Ok(_) => ensure!(succeeds, "expected the unknown key to be rejected"),
        Err(err) => {
            ensure!(!succeeds, "unexpected error: {err}");
            ensure!(
                matches!(err.as_ref(), ArgsError::UnknownConfigKey { path } if path == "Config.colour"),
                "unexpected error: {err}"
            );
        }
    }
    Ok(())
}

#[cfg(feature = "yaml")]
#[rstest]
fn yaml_configuration_is_layered(dir: ConfigDir) -> Result<()> {
    let path = dir.write(
        "settings.yaml",
        "Config:\n  count: 100\n  required: from-yaml\n",
    )?;
    let args = session::<Config>()?;
    let resolution = args
        .parse_from(argv_with_config(["--Config.count", "3"], &path))
        .map_err(|err| anyhow!("{err}"))?;
    let config = resolution
        .get::<Config>("Config")
        .ok_or_else(|| anyhow!("Config missing"))?;
    ensure!(config.count == 3);
    ensure!(config.required == "from-yaml");
    Ok(())
}

#[cfg(not(feature = "yaml"))]
#[rstest]
fn yaml_without_the_feature_fails_clearly(dir: ConfigDir) -> Result<()> {
    let path = dir.write("settings.yaml", "Config:\n  required: x\n")?;
    let args = session::<Config>()?;
    let err = args
        .parse_from(argv_with_config(Vec::<String>::new(), &path))
        .err()
        .ok_or_else(|| anyhow!("expected YAML to be refused"))?;
    ensure!(err.to_string().contains("yaml feature disabled"), "message: {err}");
    Ok(())
}
