//! Installation registry.
//!
//! Tracks every module nopkg placed into a package directory: where it came
//! from, how it was installed and where the installed artifact lives.
//!
//! # Storage Location
//!
//! The registry is a plain text file, one module per line:
//! - Linux: `~/.local/share/nopkg/registry.txt`
//! - macOS: `~/Library/Application Support/com.nopkg.nopkg/registry.txt`
//! - Windows: `C:\Users\<User>\AppData\Roaming\nopkg\nopkg\data\registry.txt`
//!
//! Setting `NOPKG_HOME` moves it to `$NOPKG_HOME/registry.txt`.

mod entry;
mod store;

pub use entry::{InstallMode, RegistryEntry, FIELD_SEPARATOR};
pub use store::{Registry, RegistryStore, REGISTRY_FILE};
