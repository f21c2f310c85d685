//! Versioned JSON manifests (package.json and friends)
//!
//! - **version**: `MAJOR.MINOR.PATCH` parsing and patch increment
//! - **rewrite**: textual and structured ways of writing a new version back
//!
//! Only the top-level `version` field is ever read or written; everything
//! else in the document passes through.

pub mod rewrite;
pub mod version;

pub use rewrite::{RewriteOutcome, rewrite_structured, rewrite_version};
pub use version::increment_version;

use crate::core::error::{ManifestError, ReleaseResult, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// Return the top-level `version` string of a JSON document, verbatim
pub fn get_version(content: &str) -> Result<String, ManifestError> {
  let doc: serde_json::Value = serde_json::from_str(content).map_err(|e| ManifestError::Parse {
    path: None,
    reason: e.to_string(),
  })?;

  doc
    .get("version")
    .and_then(|v| v.as_str())
    .map(str::to_string)
    .ok_or(ManifestError::MissingVersion { path: None })
}

/// A manifest file read into memory
#[derive(Debug, Clone)]
pub struct Manifest {
  pub path: PathBuf,
  pub content: String,
}

impl Manifest {
  /// Read a manifest from disk
  pub fn read(path: &Path) -> ReleaseResult<Self> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read manifest {}", path.display()))?;
    Ok(Self {
      path: path.to_path_buf(),
      content,
    })
  }

  /// Current `version` value
  pub fn version(&self) -> ReleaseResult<String> {
    get_version(&self.content).map_err(|e| e.at(&self.path).into())
  }

  /// Write new content back to the same path
  pub fn write(&mut self, content: String) -> ReleaseResult<()> {
    fs::write(&self.path, &content).with_context(|| format!("Failed to write manifest {}", self.path.display()))?;
    self.content = content;
    Ok(())
  }
}
