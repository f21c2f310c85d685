//! Release flows for a packaged extension
//!
//! # Core Invariants
//!
//! 1. **The packaged version is the manifest version as read**
//!    - `bump` packages the current version and only then writes the next one
//!    - children always receive the packaged version, never the bumped one
//!
//! 2. **Only `version` is touched**
//!    - every other field of a manifest passes through
//!
//! 3. **No rollback**
//!    - each child manifest is written independently, in configured order
//!
//! # Architecture
//!
//! - **manager**: `VersionManager`, the linear flow behind every command
//! - **packager**: argument-vector construction and the `CommandRunner` seam
//! - **report**: serializable `ReleaseReport` for text and JSON output

pub mod manager;
pub mod packager;
pub mod report;

pub use manager::{Operation, RunOptions, VersionManager};
pub use packager::PackagerStatus;
pub use report::ReleaseReport;
