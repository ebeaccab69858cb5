//! Capability-scoped filesystem access for configuration files.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Directory containing `path`; `"."` for bare file names.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Read `path` to a string through a `cap-std` handle on its parent
/// directory.
///
/// # Errors
///
/// Returns an [`io::Error`] when the path has no file name, the parent
/// directory cannot be opened or the file cannot be read.
pub(super) fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("configuration path has no file name"))?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
    dir.read_to_string(file_name)
}
