//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// release.toml whose packager writes the version into the artifact with sh
pub const SH_PACKAGER: &str = r#"
[packager]
program = "sh"
args = ["-c", "printf '%s' \"$0\" > \"$1\"", "{version}", "{output}"]
artifact = "ext-{version}.vsix"
strict = true
"#;

/// A project directory with a root manifest
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Create a project whose package.json is at `version`
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::write(
      path.join("package.json"),
      format!(
        r#"{{
  "name": "vscode-xp",
  "displayName": "XP",
  "version": "{}",
  "publisher": "test",
  "engines": {{
    "vscode": "^1.80.0"
  }}
}}
"#,
        version
      ),
    )?;

    Ok(Self { _root: root, path })
  }

  /// Add a child package with its own package.json
  pub fn add_child(&self, dir: &str, version: &str) -> Result<PathBuf> {
    let child = self.path.join(dir);
    std::fs::create_dir_all(&child)?;
    std::fs::write(
      child.join("package.json"),
      format!(
        "{{\n  \"name\": \"{}\",\n  \"version\": \"{}\",\n  \"main\": \"./out/extension.js\"\n}}\n",
        dir, version
      ),
    )?;
    Ok(child)
  }

  /// Write release.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("release.toml"), content)?;
    Ok(())
  }

  /// Read a file relative to the project
  pub fn read_file(&self, path: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(path)).with_context(|| format!("Failed to read {}", path))
  }

  /// Version field of a manifest relative to the project
  pub fn version_of(&self, manifest: &str) -> Result<String> {
    let doc: serde_json::Value = serde_json::from_str(&self.read_file(manifest)?)?;
    doc
      .get("version")
      .and_then(|v| v.as_str())
      .map(str::to_string)
      .context("manifest has no version")
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }
}

/// Run the vsix-release binary, returning its output whatever the exit status
pub fn run_release_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_vsix-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run vsix-release")
}

/// Run the vsix-release binary and require success
pub fn run_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_release_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "vsix-release command failed: vsix-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
