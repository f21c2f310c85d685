//! Release commands: package, propagate, bump
//!
//! Each command runs one `Operation` through the `VersionManager` and prints
//! the resulting report as text or JSON.

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::manifest::RewriteOutcome;
use crate::release::{Operation, PackagerStatus, ReleaseReport, RunOptions};
use std::path::Path;

/// Run the package command
pub fn run_package(ctx: &ReleaseContext, dry_run: bool, json: bool) -> ReleaseResult<()> {
  let options = RunOptions {
    dry_run,
    skip_package: false,
  };
  execute(ctx, Operation::Package, options, json)
}

/// Run the propagate command
pub fn run_propagate(ctx: &ReleaseContext, skip_package: bool, dry_run: bool, json: bool) -> ReleaseResult<()> {
  if ctx.config.child_dirs.is_empty() && !json {
    println!("⚠️  No child_dirs configured in release.toml; nothing to propagate");
  }
  let options = RunOptions { dry_run, skip_package };
  execute(ctx, Operation::Propagate, options, json)
}

/// Run the bump command
pub fn run_bump(
  ctx: &ReleaseContext,
  propagate: bool,
  skip_package: bool,
  dry_run: bool,
  json: bool,
) -> ReleaseResult<()> {
  let options = RunOptions { dry_run, skip_package };
  execute(ctx, Operation::Bump { propagate }, options, json)
}

fn execute(ctx: &ReleaseContext, operation: Operation, options: RunOptions, json: bool) -> ReleaseResult<()> {
  let report = ctx.manager().run(operation, options)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_report(&ctx.root, &report);
  }

  Ok(())
}

fn print_report(root: &Path, report: &ReleaseReport) {
  let rel = |path: &Path| path.strip_prefix(root).unwrap_or(path).display().to_string();

  println!("📦 {} {} ({})", report.operation, report.version, rel(&report.manifest));
  println!();

  if report.build_dir_created {
    let verb = if report.dry_run { "Would create" } else { "Created" };
    println!("  {} {}", verb, rel(&report.build_dir));
  }

  if !report.children.is_empty() {
    let verb = if report.dry_run { "Would set" } else { "Set" };
    println!("  {} version {} in:", verb, report.version);
    for child in &report.children {
      println!("    {}", rel(child));
    }
  }

  if let Some(step) = &report.packager {
    println!("  Packager: {}", step.command.display());
    match &step.status {
      PackagerStatus::Succeeded => println!("    ✅ {}", rel(&root.join(&step.command.artifact))),
      PackagerStatus::Failed { code: Some(code) } => println!("    ⚠️  exited with status {} (ignored)", code),
      PackagerStatus::Failed { code: None } => println!("    ⚠️  terminated by a signal (ignored)"),
      PackagerStatus::NotStarted { reason } => println!("    ⚠️  could not start: {} (ignored)", reason),
      PackagerStatus::DryRun => {}
    }
  }

  if let Some(next) = &report.next_version {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    let note = match report.manifest_rewrite {
      Some(RewriteOutcome::Reserialized) => " (re-serialized)",
      _ => "",
    };
    println!("  {} version {} to {}{}", verb, next, rel(&report.manifest), note);
  }

  println!();
  if report.dry_run {
    println!("🔍 Dry-run mode (no changes applied)");
  } else {
    println!("✅ Done");
  }
}
