//! Location of the persisted store.
//!
//! The store lives at `<home>/.<app_name>/store.db` unless the configuration
//! points somewhere else.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::STORE_FILENAME;

#[derive(Debug, Error)]
pub enum PathsError {
  #[error("could not determine the home directory")]
  NoHomeDir,
}

/// Returns the user's home directory
pub fn home_dir() -> Result<PathBuf, PathsError> {
  dirs::home_dir().ok_or(PathsError::NoHomeDir)
}

/// Returns the hidden per-application directory, e.g. `~/.gitswitch`
pub fn app_dir(app_name: &str) -> Result<PathBuf, PathsError> {
  Ok(home_dir()?.join(format!(".{}", app_name)))
}

/// Returns the default store file for the application
pub fn default_store_path(app_name: &str) -> Result<PathBuf, PathsError> {
  Ok(app_dir(app_name)?.join(STORE_FILENAME))
}

/// Resolves the store file location: the configured path if any, otherwise
/// [`default_store_path`].
pub fn store_path(app_name: &str, configured: Option<&Path>) -> Result<PathBuf, PathsError> {
  if let Some(path) = configured {
    return Ok(path.to_path_buf());
  }

  default_store_path(app_name)
}

/// Creates `dir` (and its parents) if missing. New directories are only
/// accessible by the current user on Unix.
pub fn ensure_private_dir(dir: &Path) -> io::Result<()> {
  if dir.as_os_str().is_empty() || dir.is_dir() {
    return Ok(());
  }

  let mut builder = fs::DirBuilder::new();
  builder.recursive(true);
  #[cfg(unix)]
  {
    use std::os::unix::fs::DirBuilderExt;
    builder.mode(0o700);
  }
  builder.create(dir)
}
