//! Core building blocks shared by every command
//!
//! - **config**: release.toml parsing, defaults and validation
//! - **context**: root directory plus loaded configuration
//! - **error**: error types with exit codes and help messages

pub mod config;
pub mod context;
pub mod error;
