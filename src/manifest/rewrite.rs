//! Writing a new version into manifest text
//!
//! Two strategies, picked by `rewrite` in release.toml:
//!
//! - **Textual**: substitute the top-level `"version": "<old>",` entry. Every
//!   byte outside the match survives, but the entry must appear as written:
//!   the key, a colon, the quoted current version and a trailing comma, with
//!   any whitespace around the colon. Entries in nested objects are skipped.
//!   When no entry qualifies (for example `version` is the last key), the
//!   document falls back to the structured rewrite.
//! - **Structured**: parse the JSON, set `version`, and serialize again with
//!   4-space indentation. Key order is kept, whitespace is not.

use crate::core::config::RewriteMode;
use crate::core::error::ManifestError;
use crate::manifest::get_version;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static VERSION_ENTRY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#""version"\s*:\s*"([^"\\]*)","#).expect("version entry pattern is valid"));

/// How the new version got into the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteOutcome {
  /// Only the version entry changed
  Patched,
  /// The whole document was serialized again
  Reserialized,
}

/// Replace the top-level `"version": "<old>",` entry with `"version": "<new>",`
///
/// Candidates are tried in document order; the first one whose substitution
/// makes the top-level `version` read `new` wins. `None` when no entry
/// qualifies.
pub fn rewrite_textual(content: &str, old: &str, new: &str) -> Option<String> {
  let replacement = format!(r#""version": "{}","#, new);

  VERSION_ENTRY
    .captures_iter(content)
    .filter(|caps| &caps[1] == old)
    .filter_map(|caps| caps.get(0))
    .map(|entry| {
      let mut rewritten = String::with_capacity(content.len() + replacement.len());
      rewritten.push_str(&content[..entry.start()]);
      rewritten.push_str(&replacement);
      rewritten.push_str(&content[entry.end()..]);
      rewritten
    })
    .find(|rewritten| get_version(rewritten).is_ok_and(|v| v == new))
}

/// Set `version` on the top-level object and re-serialize with 4-space indentation
///
/// A trailing newline on the input is carried over to the output.
pub fn rewrite_structured(content: &str, version: &str) -> Result<String, ManifestError> {
  let mut doc: serde_json::Value = serde_json::from_str(content).map_err(|e| ManifestError::Parse {
    path: None,
    reason: e.to_string(),
  })?;

  let object = doc.as_object_mut().ok_or(ManifestError::NotAnObject { path: None })?;
  object.insert("version".to_string(), serde_json::Value::String(version.to_string()));

  let mut out = to_string_indent4(&doc)?;
  if content.ends_with('\n') {
    out.push('\n');
  }
  Ok(out)
}

/// Rewrite `old` to `new` with the configured strategy
///
/// Textual mode falls back to the structured rewrite when no top-level entry
/// can be patched, so the result always carries `new`.
pub fn rewrite_version(
  content: &str,
  old: &str,
  new: &str,
  mode: RewriteMode,
) -> Result<(String, RewriteOutcome), ManifestError> {
  if mode == RewriteMode::Textual
    && let Some(rewritten) = rewrite_textual(content, old, new)
  {
    return Ok((rewritten, RewriteOutcome::Patched));
  }
  Ok((rewrite_structured(content, new)?, RewriteOutcome::Reserialized))
}

fn to_string_indent4(value: &serde_json::Value) -> Result<String, ManifestError> {
  let mut buf = Vec::new();
  let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
  let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
  value.serialize(&mut serializer).map_err(|e| ManifestError::Parse {
    path: None,
    reason: e.to_string(),
  })?;

  String::from_utf8(buf).map_err(|e| ManifestError::Parse {
    path: None,
    reason: e.to_string(),
  })
}
