//! Integration tests for `show`, `init`, global flags and error reporting

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_show_prints_version() -> Result<()> {
  let project = TestProject::new("3.17.2")?;

  let output = run_release(&project.path, &["show"])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3.17.2");

  Ok(())
}

#[test]
fn test_show_json_with_root_flag() -> Result<()> {
  let project = TestProject::new("0.4.0")?;
  let elsewhere = tempfile::TempDir::new()?;
  let root = project.path.to_string_lossy().to_string();

  let output = run_release(elsewhere.path(), &["-C", &root, "show", "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["version"], "0.4.0");
  assert!(json["manifest"].as_str().unwrap_or_default().ends_with("package.json"));

  Ok(())
}

#[test]
fn test_custom_manifest_path() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  std::fs::create_dir_all(project.path.join("ext"))?;
  std::fs::write(project.path.join("ext/manifest.json"), r#"{"version": "9.9.9", "a": 1}"#)?;
  std::fs::write(project.path.join("alt.toml"), "manifest_path = \"ext/manifest.json\"\n")?;

  let output = run_release(&project.path, &["--config", "alt.toml", "show"])?;
  assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "9.9.9");

  Ok(())
}

#[test]
fn test_missing_explicit_config() -> Result<()> {
  let project = TestProject::new("1.0.0")?;

  let output = run_release_raw(&project.path, &["--config", "missing.toml", "show"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Config file not found"), "stderr:\n{}", stderr);
  assert!(stderr.contains("Help:"));

  Ok(())
}

#[test]
fn test_missing_manifest() -> Result<()> {
  let dir = tempfile::TempDir::new()?;

  let output = run_release_raw(dir.path(), &["show"])?;
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("package.json"), "stderr:\n{}", stderr);

  Ok(())
}

#[test]
fn test_manifest_without_version() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  std::fs::write(dir.path().join("package.json"), r#"{"name": "x"}"#)?;

  let output = run_release_raw(dir.path(), &["show"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("no string \"version\" field"), "stderr:\n{}", stderr);

  Ok(())
}

#[test]
fn test_init_writes_config() -> Result<()> {
  let project = TestProject::new("1.0.0")?;

  run_release(&project.path, &["init"])?;
  let config = project.read_file("release.toml")?;
  assert!(config.contains("manifest_path = \"package.json\""), "config:\n{}", config);
  assert!(config.contains("vsce"));

  // Second init refuses, --force overwrites
  let output = run_release_raw(&project.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  run_release(&project.path, &["init", "--force"])?;

  // And the written config drives the other commands
  run_release(&project.path, &["show"])?;

  Ok(())
}

#[test]
fn test_invalid_config_value() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.write_config("rewrite = \"sideways\"\n")?;

  let output = run_release_raw(&project.path, &["show"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("release.toml"), "stderr:\n{}", stderr);

  Ok(())
}
