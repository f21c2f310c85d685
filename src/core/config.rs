use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Configuration for vsix-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every field has a default, so a missing file is the same as an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Manifest to read the version from (relative to the root)
  #[serde(default = "default_manifest_path")]
  pub manifest_path: PathBuf,

  /// Build output directory, created non-recursively when absent
  #[serde(default = "default_build_dir")]
  pub build_dir: PathBuf,

  /// Directories whose manifest receives the parent version on propagate
  #[serde(default)]
  pub child_dirs: Vec<PathBuf>,

  /// How the parent manifest is rewritten on bump
  #[serde(default)]
  pub rewrite: RewriteMode,

  #[serde(default)]
  pub packager: PackagerConfig,
}

/// Manifest rewrite strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
  /// Regex substitution of the first `"version": "..",` entry; every other byte is kept
  #[default]
  Textual,
  /// Parse, set `version`, re-serialize with 4-space indentation
  Structured,
}

/// External packager invocation
///
/// `args` and `artifact` are templates. Recognized placeholders:
/// `{version}`, `{build_dir}` and (args only) `{output}`, the artifact path
/// inside the build directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagerConfig {
  #[serde(default = "default_program")]
  pub program: String,

  #[serde(default = "default_args")]
  pub args: Vec<String>,

  #[serde(default = "default_artifact")]
  pub artifact: String,

  /// Fail the run when the packager exits non-zero or cannot be spawned
  #[serde(default)]
  pub strict: bool,
}

fn default_manifest_path() -> PathBuf {
  PathBuf::from("package.json")
}

fn default_build_dir() -> PathBuf {
  PathBuf::from("build")
}

fn default_program() -> String {
  "vsce".to_string()
}

fn default_args() -> Vec<String> {
  vec!["package".to_string(), "-o".to_string(), "{output}".to_string()]
}

fn default_artifact() -> String {
  "vscode-xp-{version}.vsix".to_string()
}

impl Default for PackagerConfig {
  fn default() -> Self {
    Self {
      program: default_program(),
      args: default_args(),
      artifact: default_artifact(),
      strict: false,
    }
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      manifest_path: default_manifest_path(),
      build_dir: default_build_dir(),
      child_dirs: Vec::new(),
      rewrite: RewriteMode::default(),
      packager: PackagerConfig::default(),
    }
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = vec![
      root.join("release.toml"),
      root.join(".release.toml"),
      root.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config for a root
  ///
  /// An explicit path must exist. Without one, the search locations are
  /// tried and the built-in defaults are used when none is present.
  pub fn load(root: &Path, explicit: Option<&Path>) -> ReleaseResult<Self> {
    let config_path = match explicit {
      Some(path) => {
        let path = if path.is_absolute() {
          path.to_path_buf()
        } else {
          root.join(path)
        };
        if !path.exists() {
          return Err(ConfigError::NotFound { path }.into());
        }
        path
      }
      None => match Self::find_config_path(root) {
        Some(path) => path,
        None => {
          log::debug!("no release.toml under {}, using defaults", root.display());
          return Ok(Self::default());
        }
      },
    };

    log::debug!("loading config from {}", config_path.display());
    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).map_err(|e| match e {
      ReleaseError::Config(e) => ReleaseError::Config(e.at(&config_path)),
      e => e.context(format!("Failed to parse config from {}", config_path.display())),
    })?;

    Ok(config)
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> ReleaseResult<Self> {
    let config: ReleaseConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Save config to release.toml under the root
  pub fn save(&self, root: &Path) -> ReleaseResult<PathBuf> {
    let config_path = root.join("release.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }

  /// Validate configuration values
  pub fn validate(&self) -> ReleaseResult<()> {
    if self.manifest_path.file_name().is_none() {
      return Err(invalid("manifest_path", "must name a file"));
    }

    if self.build_dir.as_os_str().is_empty() {
      return Err(invalid("build_dir", "must not be empty"));
    }

    for dir in &self.child_dirs {
      if dir.as_os_str().is_empty() {
        return Err(invalid("child_dirs", "entries must not be empty"));
      }
      if dir.is_absolute() || dir.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(invalid(
          "child_dirs",
          &format!("'{}' must be relative and stay inside the root", dir.display()),
        ));
      }
    }

    if self.packager.program.trim().is_empty() {
      return Err(invalid("packager.program", "must not be empty"));
    }

    if !self.packager.artifact.contains("{version}") {
      return Err(invalid("packager.artifact", "must contain the {version} placeholder"));
    }

    Ok(())
  }

  /// File name of the manifest, reused for every child directory
  pub fn manifest_file_name(&self) -> &std::ffi::OsStr {
    // validate() guarantees a file name
    self.manifest_path.file_name().unwrap_or(self.manifest_path.as_os_str())
  }
}

fn invalid(field: &str, reason: &str) -> ReleaseError {
  ConfigError::InvalidValue {
    field: field.to_string(),
    reason: reason.to_string(),
    path: None,
  }
  .into()
}
