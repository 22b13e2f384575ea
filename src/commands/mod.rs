//! CLI command implementations.
//!
//! Each command prints to stdout and returns errors to `main`, which maps
//! them to an exit code.

pub mod info;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod update;

/// Timestamp format used in human-readable output.
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
