//! Error constructors shared by the file loader.

use std::error::Error;
use std::io;
use std::sync::Arc;

use camino::Utf8Path;

use crate::ArgsError;

pub(super) fn file_error(
    path: &Utf8Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ArgsError> {
    Arc::new(ArgsError::config_file(path, err))
}

pub(super) fn unsupported(path: &Utf8Path, msg: impl Into<String>) -> Arc<ArgsError> {
    file_error(path, io::Error::new(io::ErrorKind::Unsupported, msg.into()))
}

pub(super) fn invalid_data(path: &Utf8Path, msg: impl Into<String>) -> Arc<ArgsError> {
    file_error(path, io::Error::new(io::ErrorKind::InvalidData, msg.into()))
}
