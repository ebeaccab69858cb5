//! Loading a configuration document from a path.

use camino::Utf8Path;
use serde_json::{Map, Value};
use tracing::debug;

use crate::ArgsResult;

use super::error::{file_error, invalid_data};
use super::helpers::read_to_string;
use super::parser::figment_for;

/// Decoded configuration document, keyed first by record alias.
pub type ConfigDocument = Map<String, Value>;

/// Read and decode the configuration file at `path`.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use record_args::load_config_document;
///
/// # fn run() -> record_args::ArgsResult<()> {
/// let document = load_config_document(Utf8Path::new("settings.json"))?;
/// if let Some(section) = document.get("Config") {
///     println!("{section}");
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`crate::ArgsError::ConfigFile`] when the file is missing,
/// unreadable, of an unsupported format or fails to decode into a mapping.
pub fn load_config_document(path: &Utf8Path) -> ArgsResult<ConfigDocument> {
    let data = read_to_string(path).map_err(|err| file_error(path, err))?;
    let figment = figment_for(path, &data)?;
    let document: ConfigDocument = figment
        .extract()
        .map_err(|err| invalid_data(path, err.to_string()))?;
    debug!(path = %path, sections = document.len(), "loaded configuration document");
    Ok(document)
}
