//! Reading configuration documents from disk.
//!
//! The file extension selects the decoder: `.json` is always available,
//! `.yaml`/`.yml` require the `yaml` feature and `.toml` requires the `toml`
//! feature. Every failure, including a missing file, is reported as
//! [`crate::ArgsError::ConfigFile`].

mod error;
mod helpers;
mod loader;
mod parser;
#[cfg(feature = "yaml")]
mod yaml;

pub use loader::{ConfigDocument, load_config_document};
#[cfg(feature = "yaml")]
pub use yaml::SaphyrYaml;
