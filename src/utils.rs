//! Filesystem helpers

use crate::core::error::{ReleaseResult, ResultExt};
use std::fs;
use std::path::Path;

/// Create `path` if it does not exist yet
///
/// Creation is non-recursive: a missing parent is an error, not something we
/// paper over. Returns `true` when the directory was created by this call.
pub fn ensure_dir(path: &Path) -> ReleaseResult<bool> {
  if path.exists() {
    log::debug!("{} already exists", path.display());
    return Ok(false);
  }

  log::info!("Creating directory {}", path.display());
  fs::create_dir(path).with_context(|| format!("Failed to create directory {}", path.display()))?;
  Ok(true)
}

/// Render a path for an argument vector or a log line
///
/// Paths are passed to the packager as discrete arguments, so no quoting
/// happens here; non-UTF-8 segments are replaced lossily.
pub fn path_arg(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}
