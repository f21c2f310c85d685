//! Integration tests for `vsix-release propagate`

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_propagate_to_children() -> Result<()> {
  let project = TestProject::new("2.0.1")?;
  project.add_child("client", "1.0.0")?;
  project.add_child("server", "1.9.9")?;
  project.write_config("child_dirs = [\"client\", \"server\"]\n")?;
  let root_before = project.read_file("package.json")?;

  let output = run_release(&project.path, &["propagate", "--skip-package"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(project.version_of("client/package.json")?, "2.0.1");
  assert_eq!(project.version_of("server/package.json")?, "2.0.1");
  assert!(stdout.contains("client"), "stdout:\n{}", stdout);

  // Children are rewritten with 4-space indentation, keys in order
  assert_eq!(
    project.read_file("client/package.json")?,
    "{\n    \"name\": \"client\",\n    \"version\": \"2.0.1\",\n    \"main\": \"./out/extension.js\"\n}\n"
  );

  // Root manifest is never rewritten by propagate
  assert_eq!(project.read_file("package.json")?, root_before);

  Ok(())
}

#[test]
fn test_propagate_stops_at_broken_child() -> Result<()> {
  let project = TestProject::new("2.0.1")?;
  project.add_child("client", "1.0.0")?;
  std::fs::create_dir_all(project.path.join("broken"))?;
  std::fs::write(project.path.join("broken/package.json"), "{ not json")?;
  project.add_child("server", "1.0.0")?;
  project.write_config("child_dirs = [\"client\", \"broken\", \"server\"]\n")?;

  let output = run_release_raw(&project.path, &["propagate", "--skip-package"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("broken"), "stderr:\n{}", stderr);

  // No rollback: client updated, server untouched
  assert_eq!(project.version_of("client/package.json")?, "2.0.1");
  assert_eq!(project.version_of("server/package.json")?, "1.0.0");

  Ok(())
}

#[test]
fn test_propagate_without_children() -> Result<()> {
  let project = TestProject::new("1.0.0")?;

  let output = run_release(&project.path, &["propagate", "--skip-package"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("nothing to propagate"), "stdout:\n{}", stdout);

  Ok(())
}
