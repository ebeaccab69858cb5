//! YAML provider backed by `serde-saphyr`.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value as FigmentValue},
};
use serde_saphyr::Options;

/// Figment provider that parses in-memory YAML with `serde-saphyr`.
///
/// Booleans are strict: only `true` and `false` are booleans, so values
/// such as `yes` stay strings. An empty document yields an empty mapping.
#[derive(Debug, Clone)]
pub struct SaphyrYaml {
    path: Utf8PathBuf,
    contents: String,
}

impl SaphyrYaml {
    /// Provider for `contents`, reported as originating from `path`.
    #[must_use]
    pub fn string(path: impl AsRef<Utf8Path>, contents: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            contents: contents.into(),
        }
    }

    fn parse_value(contents: &str) -> Result<FigmentValue, serde_saphyr::Error> {
        serde_saphyr::from_str_with_options(
            contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
    }
}

impl Provider for SaphyrYaml {
    fn metadata(&self) -> Metadata {
        Metadata::from("Saphyr YAML", self.path.as_std_path())
    }

    fn data(&self) -> Result<BTreeMap<Profile, Dict>, figment::Error> {
        if self.contents.trim().is_empty() {
            return Ok(Profile::Default.collect(Dict::new()));
        }
        let value = Self::parse_value(&self.contents).map_err(|err| {
            figment::Error::from(Kind::Message(format!(
                "failed to parse {}: {err}",
                self.path
            )))
        })?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Profile::Default.collect(dict))
    }
}
