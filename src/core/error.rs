//! Error types for vsix-release with contextual messages and exit codes
//!
//! Every failure of a release run funnels into [`ReleaseError`]. Each variant
//! maps to a process exit code and, where one exists, a help hint that is
//! printed below the error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for vsix-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, malformed manifest, bad version)
  User = 1,
  /// System error (filesystem, packager)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for vsix-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// Manifest could not be read as a versioned JSON document
  Manifest(ManifestError),

  /// Version string is not `MAJOR.MINOR.PATCH`
  VersionFormat { version: String, reason: String },

  /// External packager failed (strict mode only)
  Packager { command: String, reason: String },

  /// I/O errors
  Io(io::Error),

  /// I/O error with a note on what was being done (usually the path)
  IoContext { context: String, source: io::Error },

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

/// Result type for vsix-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      ReleaseError::Io(source) => ReleaseError::IoContext {
        context: ctx_str,
        source,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Manifest(_) => ExitCode::User,
      ReleaseError::VersionFormat { .. } => ExitCode::User,
      ReleaseError::Packager { .. } => ExitCode::System,
      ReleaseError::Io(_) | ReleaseError::IoContext { .. } => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Manifest(e) => e.help_message(),
      ReleaseError::VersionFormat { .. } => {
        Some("Versions must look like MAJOR.MINOR.PATCH, e.g. \"1.4.2\".".to_string())
      }
      ReleaseError::Packager { .. } => Some(
        "Check that the packager is installed and on PATH, or set `packager.strict = false` in release.toml."
          .to_string(),
      ),
      ReleaseError::Message { .. } | ReleaseError::Io(_) | ReleaseError::IoContext { .. } => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Manifest(e) => write!(f, "{}", e),
      ReleaseError::VersionFormat { version, reason } => {
        write!(f, "Invalid version '{}': {}", version, reason)
      }
      ReleaseError::Packager { command, reason } => {
        write!(f, "Packager failed: {}\n{}", command, reason)
      }
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::IoContext { context, source } => write!(f, "{}\nI/O error: {}", context, source),
      ReleaseError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) | ReleaseError::IoContext { source: e, .. } => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for ReleaseError {
  fn from(err: toml_edit::ser::Error) -> Self {
    ReleaseError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<ManifestError> for ReleaseError {
  fn from(err: ManifestError) -> Self {
    ReleaseError::Manifest(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// Config file already exists (init without --force)
  AlreadyExists { path: PathBuf },

  /// A field holds a value we cannot work with
  InvalidValue {
    field: String,
    reason: String,
    path: Option<PathBuf>,
  },
}

impl ConfigError {
  /// Attach the config file path, keeping an already recorded one
  pub fn at(self, config: &std::path::Path) -> Self {
    match self {
      ConfigError::InvalidValue { field, reason, path } => ConfigError::InvalidValue {
        field,
        reason,
        path: path.or_else(|| Some(config.to_path_buf())),
      },
      other => other,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Run `vsix-release init` to create a release.toml, or drop --config to use defaults.".to_string())
      }
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite the existing file.".to_string()),
      ConfigError::InvalidValue { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Config file already exists: {}", path.display())
      }
      ConfigError::InvalidValue { field, reason, path } => {
        write!(f, "Invalid value for '{}' in config{}: {}", field, describe(path), reason)
      }
    }
  }
}

/// Manifest errors
#[derive(Debug)]
pub enum ManifestError {
  /// Text is not valid JSON
  Parse { path: Option<PathBuf>, reason: String },

  /// No string `version` field
  MissingVersion { path: Option<PathBuf> },

  /// Structured rewrite needs a JSON object at the top level
  NotAnObject { path: Option<PathBuf> },
}

impl ManifestError {
  /// Attach the manifest path, keeping an already recorded one
  pub fn at(self, manifest: &std::path::Path) -> Self {
    let fill = |p: Option<PathBuf>| p.or_else(|| Some(manifest.to_path_buf()));
    match self {
      ManifestError::Parse { path, reason } => ManifestError::Parse {
        path: fill(path),
        reason,
      },
      ManifestError::MissingVersion { path } => ManifestError::MissingVersion { path: fill(path) },
      ManifestError::NotAnObject { path } => ManifestError::NotAnObject { path: fill(path) },
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::MissingVersion { .. } => {
        Some("Add a top-level \"version\": \"0.0.1\" entry to the manifest.".to_string())
      }
      _ => None,
    }
  }
}

fn describe(path: &Option<PathBuf>) -> String {
  path
    .as_ref()
    .map(|p| format!(" ({})", p.display()))
    .unwrap_or_default()
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::Parse { path, reason } => {
        write!(f, "Manifest is not valid JSON{}: {}", describe(path), reason)
      }
      ManifestError::MissingVersion { path } => {
        write!(f, "Manifest has no string \"version\" field{}", describe(path))
      }
      ManifestError::NotAnObject { path } => {
        write!(f, "Manifest is not a JSON object{}", describe(path))
      }
    }
  }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
