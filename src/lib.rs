pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod installer;
pub mod interpreter;
pub mod logging;
pub mod manager;
pub mod registry;

pub use config::Config;
pub use error::{NopkgError, Result};
pub use installer::Installer;
pub use manager::{ModuleManager, UninstallOutcome};
pub use registry::{InstallMode, Registry, RegistryEntry, RegistryStore};
