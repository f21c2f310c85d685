//! External packager invocation
//!
//! The packager is run from an argument vector, never an interpolated shell
//! string. On unix, paths with spaces or shell metacharacters reach it
//! intact. On Windows the vector goes through `cmd /C`, which re-parses the
//! line: keep `&`, `|`, `<`, `>` and `^` out of the build directory and
//! artifact names there.

use crate::core::config::PackagerConfig;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::utils::path_arg;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit information of a finished process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
  pub success: bool,
  /// None when the process was terminated by a signal
  pub code: Option<i32>,
}

/// Runs an external program to completion with inherited stdio
pub trait CommandRunner {
  fn run(&self, cwd: &Path, program: &str, args: &[String]) -> io::Result<RunStatus>;
}

/// Spawns real processes
///
/// On Windows the program goes through `cmd /C` so that `.cmd` shims
/// installed by npm (such as `vsce.cmd`) resolve. `cmd` interprets its own
/// metacharacters in the arguments, so they are not shell-safe there.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, cwd: &Path, program: &str, args: &[String]) -> io::Result<RunStatus> {
    #[cfg(target_os = "windows")]
    let mut command = {
      let mut command = Command::new("cmd");
      command.arg("/C").arg(program);
      command
    };
    #[cfg(not(target_os = "windows"))]
    let mut command = Command::new(program);

    let status = command.args(args).current_dir(cwd).status()?;
    Ok(RunStatus {
      success: status.success(),
      code: status.code(),
    })
  }
}

/// A fully expanded packager command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagerCommand {
  pub program: String,
  pub args: Vec<String>,
  /// Archive the packager is asked to produce
  pub artifact: PathBuf,
}

impl PackagerCommand {
  /// Expand the configured templates for one version
  ///
  /// `build_dir` is used as given (relative paths resolve against the
  /// directory the packager runs in).
  pub fn from_config(config: &PackagerConfig, build_dir: &Path, version: &str) -> Self {
    let artifact_name = config.artifact.replace("{version}", version);
    let artifact = build_dir.join(artifact_name);
    let output = path_arg(&artifact);
    let build_dir = path_arg(build_dir);

    let args = config
      .args
      .iter()
      .map(|arg| {
        arg
          .replace("{output}", &output)
          .replace("{build_dir}", &build_dir)
          .replace("{version}", version)
      })
      .collect();

    Self {
      program: config.program.clone(),
      args,
      artifact,
    }
  }

  /// Human-readable command line; arguments with whitespace are quoted
  pub fn display(&self) -> String {
    std::iter::once(&self.program)
      .chain(self.args.iter())
      .map(|part| {
        if part.is_empty() || part.chars().any(char::is_whitespace) {
          format!("{:?}", part)
        } else {
          part.clone()
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// What happened when the packager ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PackagerStatus {
  Succeeded,
  /// Exited non-zero (ignored unless strict)
  Failed { code: Option<i32> },
  /// Could not be spawned (ignored unless strict)
  NotStarted { reason: String },
  /// --dry-run: printed, not run
  DryRun,
}

/// Run the packager and classify the result
///
/// Failures are logged and reported but only become errors in strict mode.
pub fn invoke<R: CommandRunner>(
  runner: &R,
  cwd: &Path,
  command: &PackagerCommand,
  strict: bool,
) -> ReleaseResult<PackagerStatus> {
  log::info!("Running {}", command.display());

  let status = match runner.run(cwd, &command.program, &command.args) {
    Ok(RunStatus { success: true, .. }) => PackagerStatus::Succeeded,
    Ok(RunStatus { code, .. }) => PackagerStatus::Failed { code },
    Err(err) => PackagerStatus::NotStarted {
      reason: err.to_string(),
    },
  };

  match &status {
    PackagerStatus::Succeeded => {}
    PackagerStatus::Failed { code } => {
      let reason = match code {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by a signal".to_string(),
      };
      if strict {
        return Err(ReleaseError::Packager {
          command: command.display(),
          reason,
        });
      }
      log::warn!("packager {} (ignored)", reason);
    }
    PackagerStatus::NotStarted { reason } => {
      if strict {
        return Err(ReleaseError::Packager {
          command: command.display(),
          reason: reason.clone(),
        });
      }
      log::warn!("packager could not be started: {} (ignored)", reason);
    }
    PackagerStatus::DryRun => {}
  }

  Ok(status)
}
