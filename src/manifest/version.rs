//! Dotted `MAJOR.MINOR.PATCH` version strings
//!
//! Segments are kept as digit strings rather than machine integers, so the
//! patch increment never overflows and major/minor pass through untouched.

use crate::core::error::{ReleaseError, ReleaseResult};
use std::fmt;
use std::str::FromStr;

/// A three-segment numeric version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionString {
  major: String,
  minor: String,
  patch: String,
}

impl VersionString {
  /// Parse `MAJOR.MINOR.PATCH`; every segment must be a non-empty run of ASCII digits
  pub fn parse(version: &str) -> ReleaseResult<Self> {
    let segments: Vec<&str> = version.split('.').collect();
    if segments.len() != 3 {
      return Err(format_error(
        version,
        format!("expected 3 dot-separated segments, found {}", segments.len()),
      ));
    }

    for (name, segment) in ["major", "minor", "patch"].iter().zip(&segments) {
      if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_error(
          version,
          format!("{} segment '{}' is not a non-negative integer", name, segment),
        ));
      }
    }

    Ok(Self {
      major: segments[0].to_string(),
      minor: segments[1].to_string(),
      patch: segments[2].to_string(),
    })
  }

  /// Same major and minor, patch + 1
  pub fn next_patch(&self) -> Self {
    Self {
      major: self.major.clone(),
      minor: self.minor.clone(),
      patch: increment_digits(&self.patch),
    }
  }
}

impl FromStr for VersionString {
  type Err = ReleaseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for VersionString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
  }
}

/// Increment the patch segment of a dotted version string
///
/// `"1.2.3"` becomes `"1.2.4"`, `"0.0.9"` becomes `"0.0.10"`.
pub fn increment_version(version: &str) -> ReleaseResult<String> {
  Ok(VersionString::parse(version)?.next_patch().to_string())
}

/// Add one to a decimal digit string, dropping leading zeros like an integer round trip would
fn increment_digits(digits: &str) -> String {
  let trimmed = digits.trim_start_matches('0');
  let mut out: Vec<u8> = trimmed.bytes().collect();

  let mut carry = true;
  for byte in out.iter_mut().rev() {
    if *byte == b'9' {
      *byte = b'0';
    } else {
      *byte += 1;
      carry = false;
      break;
    }
  }
  if carry {
    out.insert(0, b'1');
  }

  // Only ASCII digits were pushed
  String::from_utf8(out).unwrap_or_default()
}

fn format_error(version: &str, reason: String) -> ReleaseError {
  ReleaseError::VersionFormat {
    version: version.to_string(),
    reason,
  }
}
