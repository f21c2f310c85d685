//! Version Manager: the linear release flow
//!
//! ensure build dir → read manifest → extract version → (propagate / compute
//! next version) → package → (persist next version)

use crate::core::config::{ReleaseConfig, RewriteMode};
use crate::core::error::{ReleaseResult, ResultExt};
use crate::manifest::{Manifest, RewriteOutcome, increment_version, rewrite_structured, rewrite_version};
use crate::release::packager::{self, CommandRunner, PackagerCommand, PackagerStatus, SystemRunner};
use crate::release::report::{PackagerStep, ReleaseReport};
use crate::utils::ensure_dir;
use std::path::{Path, PathBuf};

/// Which release flow to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  /// Package the current version
  Package,
  /// Copy the current version into every child manifest, then package
  Propagate,
  /// Package the current version, then write the next patch version to the manifest
  Bump { propagate: bool },
}

impl Operation {
  pub fn name(&self) -> &'static str {
    match self {
      Operation::Package => "package",
      Operation::Propagate => "propagate",
      Operation::Bump { .. } => "bump",
    }
  }

  fn propagates(&self) -> bool {
    matches!(self, Operation::Propagate | Operation::Bump { propagate: true })
  }
}

/// Switches shared by every operation
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
  /// Print what would happen; no writes, no packager
  pub dry_run: bool,
  pub skip_package: bool,
}

/// Reads, bumps and propagates manifest versions under one root
pub struct VersionManager<R: CommandRunner = SystemRunner> {
  root: PathBuf,
  config: ReleaseConfig,
  runner: R,
}

impl VersionManager<SystemRunner> {
  pub fn new(root: &Path, config: ReleaseConfig) -> Self {
    Self::with_runner(root, config, SystemRunner)
  }
}

impl<R: CommandRunner> VersionManager<R> {
  pub fn with_runner(root: &Path, config: ReleaseConfig, runner: R) -> Self {
    Self {
      root: root.to_path_buf(),
      config,
      runner,
    }
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.root.join(&self.config.manifest_path)
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root.join(&self.config.build_dir)
  }

  /// Manifest paths of every configured child, in order
  pub fn child_manifest_paths(&self) -> Vec<PathBuf> {
    let file_name = self.config.manifest_file_name();
    self
      .config
      .child_dirs
      .iter()
      .map(|dir| self.root.join(dir).join(file_name))
      .collect()
  }

  /// Current version of the parent manifest
  pub fn get_version(&self) -> ReleaseResult<String> {
    Manifest::read(&self.manifest_path())?.version()
  }

  /// Create the build directory if needed; true when created
  pub fn ensure_build_dir(&self) -> ReleaseResult<bool> {
    ensure_dir(&self.build_dir())
  }

  /// Write `version` into every child manifest, in order
  ///
  /// Children are independent: if one fails, the ones before it stay
  /// updated and the ones after it are not touched.
  pub fn propagate(&self, version: &str) -> ReleaseResult<Vec<PathBuf>> {
    let mut updated = Vec::new();

    for path in self.child_manifest_paths() {
      let mut child = Manifest::read(&path).with_context(|| format!("Failed to propagate version to {}", path.display()))?;
      let content = rewrite_structured(&child.content, version).map_err(|e| e.at(&path))?;
      child.write(content)?;

      log::info!("Set version {} in {}", version, path.display());
      updated.push(path);
    }

    Ok(updated)
  }

  /// Command line the packager would get for `version`
  pub fn packager_command(&self, version: &str) -> PackagerCommand {
    PackagerCommand::from_config(&self.config.packager, &self.config.build_dir, version)
  }

  /// Run the packager for `version` from the root
  pub fn package(&self, version: &str) -> ReleaseResult<PackagerStep> {
    let command = self.packager_command(version);
    let status = packager::invoke(&self.runner, &self.root, &command, self.config.packager.strict)?;
    Ok(PackagerStep { command, status })
  }

  /// Run one release flow end to end
  pub fn run(&self, operation: Operation, options: RunOptions) -> ReleaseResult<ReleaseReport> {
    let build_dir = self.build_dir();
    let build_dir_created = if options.dry_run {
      !build_dir.exists()
    } else {
      self.ensure_build_dir()?
    };

    let mut manifest = Manifest::read(&self.manifest_path())?;
    let version = manifest.version()?;
    log::debug!("{} is at version {}", manifest.path.display(), version);

    // Fail on a malformed version before anything is packaged
    let next_version = match operation {
      Operation::Bump { .. } => Some(increment_version(&version)?),
      _ => None,
    };

    let children = if !operation.propagates() {
      Vec::new()
    } else if options.dry_run {
      self.child_manifest_paths()
    } else {
      self.propagate(&version)?
    };

    let packager = if options.skip_package {
      None
    } else if options.dry_run {
      Some(PackagerStep {
        command: self.packager_command(&version),
        status: PackagerStatus::DryRun,
      })
    } else {
      Some(self.package(&version)?)
    };

    let manifest_rewrite = match &next_version {
      Some(next) => Some(self.persist_version(&mut manifest, &version, next, options.dry_run)?),
      None => None,
    };

    Ok(ReleaseReport {
      operation: operation.name(),
      dry_run: options.dry_run,
      manifest: manifest.path,
      version,
      next_version,
      manifest_rewrite,
      build_dir,
      build_dir_created,
      children,
      packager,
    })
  }

  fn persist_version(
    &self,
    manifest: &mut Manifest,
    current: &str,
    next: &str,
    dry_run: bool,
  ) -> ReleaseResult<RewriteOutcome> {
    let (content, outcome) =
      rewrite_version(&manifest.content, current, next, self.config.rewrite).map_err(|e| e.at(&manifest.path))?;

    if self.config.rewrite == RewriteMode::Textual && outcome == RewriteOutcome::Reserialized {
      log::warn!(
        "no top-level `\"version\": \"{}\",` entry in {}; re-serializing the whole manifest",
        current,
        manifest.path.display()
      );
    }

    if !dry_run {
      manifest.write(content)?;
      log::info!("Set version {} in {}", next, manifest.path.display());
    }

    Ok(outcome)
  }
}
