use crate::core::config::ReleaseConfig;
use crate::core::error::{ConfigError, ReleaseResult};
use std::path::Path;

/// Write a release.toml with the default settings
pub fn run_init(root: &Path, force: bool) -> ReleaseResult<()> {
  if let Some(existing) = ReleaseConfig::find_config_path(root)
    && !force
  {
    return Err(ConfigError::AlreadyExists { path: existing }.into());
  }

  let path = ReleaseConfig::default().save(root)?;

  println!("✅ Wrote {}", path.display());
  println!();
  println!("Next steps:");
  println!("  Set child_dirs to the directories whose manifest should follow the root version");
  println!("  vsix-release bump --dry-run");

  Ok(())
}
