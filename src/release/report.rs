use crate::manifest::RewriteOutcome;
use crate::release::packager::{PackagerCommand, PackagerStatus};
use serde::Serialize;
use std::path::PathBuf;

/// Packager command together with how it went
#[derive(Debug, Clone, Serialize)]
pub struct PackagerStep {
  pub command: PackagerCommand,
  #[serde(flatten)]
  pub status: PackagerStatus,
}

/// Summary of one release run (printed as text, or as JSON with --json)
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
  pub operation: &'static str,
  pub dry_run: bool,
  pub manifest: PathBuf,
  /// Version read from the manifest (and packaged)
  pub version: String,
  /// Version written back by bump
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_version: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub manifest_rewrite: Option<RewriteOutcome>,
  pub build_dir: PathBuf,
  /// Created by this run (or would be, in a dry run)
  pub build_dir_created: bool,
  /// Child manifests that received `version`
  pub children: Vec<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub packager: Option<PackagerStep>,
}
