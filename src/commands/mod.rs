//! CLI commands for vsix-release
//!
//! - **show**: print the manifest version
//! - **release**: package, propagate and bump
//! - **init**: write a default release.toml
//!
//! Commands that read manifests take `&ReleaseContext`.

pub mod init;
pub mod release;
pub mod show;

pub use init::run_init;
pub use release::{run_bump, run_package, run_propagate};
pub use show::run_show;
