//! Temporary directories holding configuration files.
//!
//! Files are written through a `cap-std` handle on the temporary directory
//! so tests never touch paths outside it.
//!
//! # Examples
//!
//! ```
//! use test_helpers::config::ConfigDir;
//!
//! let dir = ConfigDir::new().expect("create temp dir");
//! let path = dir.write("settings.json", r#"{"Config": {"count": 1}}"#).expect("write");
//! assert!(path.as_str().ends_with("settings.json"));
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// Temporary directory removed when dropped.
pub struct ConfigDir {
    root: Utf8PathBuf,
    dir: Dir,
    _temp: TempDir,
}

impl ConfigDir {
    /// Create an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, its path is not
    /// valid UTF-8 or it cannot be opened.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open {root}"))?;
        Ok(Self {
            root,
            dir,
            _temp: temp,
        })
    }

    /// Write `contents` to `name` and return the file's absolute path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        self.dir
            .write(name, contents)
            .with_context(|| format!("write {name}"))?;
        Ok(self.root.join(name))
    }

    /// Absolute path of `name` inside the directory, whether or not it exists.
    #[must_use]
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigDir;

    #[test]
    fn written_files_live_under_root() -> anyhow::Result<()> {
        let dir = ConfigDir::new()?;
        let path = dir.write("a.json", "{}")?;
        assert!(path.starts_with(dir.root()));
        assert_eq!(std::fs::read_to_string(&path)?, "{}");
        Ok(())
    }
}
