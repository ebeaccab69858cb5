//! Resolve nested, schema-described records from dotted command-line
//! options, a configuration file and declared defaults.
//!
//! Each registered record contributes one `--<Alias>.<field>` option per
//! leaf field, with nested records expanding to longer dotted paths. Every
//! leaf is resolved on its own: a value typed on the command line wins,
//! then the configuration file, then the declared default.
//!
//! ```
//! use record_args::{Record, RecordArgs};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, Record)]
//! struct Config {
//!     #[record(default = "test")]
//!     name: String,
//!     #[record(default = 5)]
//!     count: i64,
//!     required: String,
//! }
//!
//! let args = RecordArgs::builder().record::<Config>()?.build()?;
//! let mut resolution = args.parse_from(["prog", "--Config.required", "value"])?;
//! let config: Config = resolution.take("Config").expect("Config is registered");
//! assert_eq!(config.name, "test");
//! assert_eq!(config.count, 5);
//! assert_eq!(config.required, "value");
//! # Ok::<(), std::sync::Arc<record_args::ArgsError>>(())
//! ```

use std::sync::Arc;

pub use record_args_macros::Record;

pub mod boundary;
mod build;
pub mod coerce;
mod config_flag;
mod error;
mod file;
mod flags;
pub mod merge;
mod options;
mod registry;
mod resolution;
mod result_ext;
pub mod schema;
mod session;
pub mod walker;

pub use config_flag::ConfigFlag;
pub use boundary::is_display_request;
pub use error::ArgsError;
pub use file::{ConfigDocument, load_config_document};
#[cfg(feature = "yaml")]
pub use file::SaphyrYaml;
pub use flags::FlagSpec;
pub use merge::{CliValues, Provenance};
pub use options::{BoolSyntax, ResolverOptions, UnknownKeyPolicy};
pub use registry::{CustomFlag, FlagRegistry};
pub use resolution::Resolution;
pub use result_ext::ArgsResultExt;
pub use schema::Record;
pub use session::{RecordArgs, RecordArgsBuilder};

#[doc(hidden)]
pub use serde_json;

/// Result type used throughout the crate.
pub type ArgsResult<T> = Result<T, Arc<ArgsError>>;
