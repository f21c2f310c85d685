//! Release context - build once in main.rs, pass to every command
//!
//! ```text
//! main.rs:
//!   ReleaseContext::build() -> &ReleaseContext
//!   |
//!   v
//! commands/package.rs, bump.rs, etc:
//!   fn run_*(ctx: &ReleaseContext, ...)
//! ```

use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::release::VersionManager;
use std::path::{Path, PathBuf};

/// Root directory plus the configuration that applies to it
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Directory every configured path is relative to (absolute)
  pub root: PathBuf,

  /// Loaded release.toml, or defaults when none exists
  pub config: ReleaseConfig,
}

impl ReleaseContext {
  /// Resolve the root and load its configuration
  pub fn build(root: &Path, config_path: Option<&Path>) -> ReleaseResult<Self> {
    let root = root
      .canonicalize()
      .with_context(|| format!("Failed to resolve root directory {}", root.display()))?;
    let config = ReleaseConfig::load(&root, config_path)?;

    Ok(Self { root, config })
  }

  /// Version manager over this root using the real packager
  pub fn manager(&self) -> VersionManager {
    VersionManager::new(&self.root, self.config.clone())
  }
}
