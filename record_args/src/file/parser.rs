//! Format selection for configuration files.

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Format, Json},
};
#[cfg(feature = "toml")]
use figment::providers::Toml;

use crate::ArgsResult;

#[cfg(not(all(feature = "yaml", feature = "toml")))]
use super::error::file_error;
use super::error::unsupported;
#[cfg(feature = "yaml")]
use super::yaml::SaphyrYaml;

/// Build a figment for `data` according to the extension of `path`.
///
/// # Errors
///
/// Returns [`crate::ArgsError::ConfigFile`] when the extension is not
/// recognised or names a format whose feature is disabled.
pub(super) fn figment_for(path: &Utf8Path, data: &str) -> ArgsResult<Figment> {
    let ext = path.extension().map(str::to_ascii_lowercase);
    let figment = match ext.as_deref() {
        Some("json") => Figment::from(Json::string(data)),
        Some("yaml" | "yml") => {
            #[cfg(feature = "yaml")]
            {
                Figment::from(SaphyrYaml::string(path, data))
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(file_error(
                    path,
                    std::io::Error::other(
                        "yaml feature disabled: enable the 'yaml' feature to read YAML configuration files",
                    ),
                ));
            }
        }
        Some("toml") => {
            #[cfg(feature = "toml")]
            {
                Figment::from(Toml::string(data))
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(file_error(
                    path,
                    std::io::Error::other(
                        "toml feature disabled: enable the 'toml' feature to read TOML configuration files",
                    ),
                ));
            }
        }
        other => {
            return Err(unsupported(
                path,
                format!(
                    "unsupported configuration format '{}'; use .json, .yaml, .yml or .toml",
                    other.unwrap_or_default()
                ),
            ));
        }
    };
    Ok(figment)
}
