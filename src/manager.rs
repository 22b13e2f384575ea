//! Install, list, info, update and uninstall.
//!
//! Each operation loads the registry, does its filesystem work through the
//! [`Installer`], and saves the registry back in one piece.

use std::path::Path;
use tracing::{info, warn};

use crate::error::{NopkgError, Result};
use crate::installer::{derive_module_name, remove_artifact, resolve_source, Installer};
use crate::registry::{InstallMode, RegistryEntry, RegistryStore};

/// Result of a successful uninstall.
#[derive(Debug, Clone)]
pub struct UninstallOutcome {
    /// The entry that was removed from the registry
    pub entry: RegistryEntry,
    /// `false` if the installed files were already gone
    pub artifact_removed: bool,
}

/// Registry-backed module operations.
#[derive(Debug, Clone)]
pub struct ModuleManager {
    store: RegistryStore,
}

impl ModuleManager {
    pub fn new(store: RegistryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// Install `source` with `installer` and record it.
    ///
    /// An existing entry with the same name is replaced.
    pub fn install(
        &self,
        installer: &Installer,
        source: &Path,
        mode: InstallMode,
        name: Option<&str>,
    ) -> Result<RegistryEntry> {
        let mut registry = self.store.load()?;

        let source = resolve_source(source)?;
        let name = match name {
            Some(n) => n.to_string(),
            None => derive_module_name(&source)?,
        };
        let prior = registry.get(&name).cloned();

        let entry = installer.install(&source, mode, Some(&name), prior.as_ref())?;
        registry.upsert(entry.clone());
        self.store.save(&registry)?;

        Ok(entry)
    }

    /// All installed modules, ordered by name.
    pub fn list(&self) -> Result<Vec<RegistryEntry>> {
        Ok(self.store.load()?.entries().cloned().collect())
    }

    /// The entry for `name`.
    pub fn info(&self, name: &str) -> Result<RegistryEntry> {
        self.store
            .load()?
            .get(name)
            .cloned()
            .ok_or_else(|| NopkgError::NotFound {
                name: name.to_string(),
            })
    }

    /// Reinstall `name` from its recorded source, same mode and target.
    pub fn update(&self, name: &str) -> Result<RegistryEntry> {
        let mut registry = self.store.load()?;
        let current = registry
            .get(name)
            .cloned()
            .ok_or_else(|| NopkgError::NotFound {
                name: name.to_string(),
            })?;

        if !current.source_exists() {
            return Err(NopkgError::SourceNotFound {
                path: current.source_path.clone(),
            });
        }

        let target_dir = current.target_dir().ok_or_else(|| NopkgError::InvalidEntry {
            name: name.to_string(),
            reason: format!("install path {:?} has no parent", current.install_path),
        })?;

        let entry = Installer::new(target_dir).install(
            &current.source_path,
            current.mode,
            Some(&current.name),
            Some(&current),
        )?;
        registry.upsert(entry.clone());
        self.store.save(&registry)?;

        info!("Updated '{}' from {:?}", name, entry.source_path);
        Ok(entry)
    }

    /// Delete the installed files for `name` and forget it.
    ///
    /// The registry entry is removed even when deleting the files fails; the
    /// failure is then returned as [`NopkgError::Cleanup`].
    pub fn uninstall(&self, name: &str) -> Result<UninstallOutcome> {
        let mut registry = self.store.load()?;
        let entry = registry.remove(name).ok_or_else(|| NopkgError::NotFound {
            name: name.to_string(),
        })?;

        let removal = remove_artifact(&entry.install_path);
        self.store.save(&registry)?;

        match removal {
            Ok(artifact_removed) => {
                if artifact_removed {
                    info!("Uninstalled '{}' from {:?}", name, entry.install_path);
                } else {
                    warn!("'{}' was already missing at {:?}", name, entry.install_path);
                }
                Ok(UninstallOutcome {
                    entry,
                    artifact_removed,
                })
            }
            Err(source) => {
                warn!("Failed to delete {:?}: {}", entry.install_path, source);
                Err(NopkgError::Cleanup {
                    name: entry.name,
                    path: entry.install_path,
                    source,
                })
            }
        }
    }
}
