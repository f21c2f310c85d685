//! Integration tests for `vsix-release package`

use crate::helpers::*;
use anyhow::Result;

#[cfg(unix)]
#[test]
fn test_package_creates_build_dir_and_artifact() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.write_config(SH_PACKAGER)?;
  assert!(!project.file_exists("build"));

  let output = run_release(&project.path, &["package"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(project.file_exists("build"));
  assert!(stderr.contains("Creating directory"), "stderr:\n{}", stderr);
  assert_eq!(project.read_file("build/ext-1.0.0.vsix")?, "1.0.0");

  // package never touches the manifest
  assert_eq!(project.version_of("package.json")?, "1.0.0");

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_package_twice_is_fine() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.write_config(SH_PACKAGER)?;

  run_release(&project.path, &["package"])?;
  let output = run_release(&project.path, &["package"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(!stderr.contains("Creating directory"));
  assert!(project.file_exists("build/ext-1.0.0.vsix"));

  Ok(())
}

#[test]
fn test_package_missing_packager_is_ignored() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.write_config(
    r#"
[packager]
program = "vsix-release-test-no-such-program"
"#,
  )?;

  let output = run_release(&project.path, &["package", "--json"])?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(report["operation"], "package");
  assert_eq!(report["version"], "1.0.0");
  assert_eq!(report["packager"]["status"], "not_started");
  assert!(project.file_exists("build"));

  Ok(())
}

#[test]
fn test_package_strict_mode_fails() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.write_config(
    r#"
[packager]
program = "vsix-release-test-no-such-program"
strict = true
"#,
  )?;

  let output = run_release_raw(&project.path, &["package"])?;
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Packager failed"), "stderr:\n{}", stderr);

  Ok(())
}

#[test]
fn test_package_dry_run() -> Result<()> {
  let project = TestProject::new("3.17.2")?;

  let output = run_release(&project.path, &["package", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("vsce package -o"), "stdout:\n{}", stdout);
  assert!(stdout.contains("vscode-xp-3.17.2.vsix"));
  assert!(stdout.contains("Dry-run"));
  assert!(!project.file_exists("build"));

  Ok(())
}

#[test]
fn test_package_build_dir_parent_missing() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.write_config("build_dir = \"out/build\"\n")?;

  let output = run_release_raw(&project.path, &["package"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(!project.file_exists("out"));

  Ok(())
}
