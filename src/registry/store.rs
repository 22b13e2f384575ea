//! Installation registry stored as a line-oriented text file.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::entry::RegistryEntry;
use crate::config;
use crate::error::{NopkgError, Result};

/// Registry file name inside the global nopkg directory.
pub const REGISTRY_FILE: &str = "registry.txt";

const HEADER: &str = "# nopkg registry: name|source|mode|install_path|installed_at";

/// In-memory view of every installed module, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl Registry {
    /// Insert or replace the entry with the same name.
    ///
    /// Returns the replaced entry if there was one.
    pub fn upsert(&mut self, entry: RegistryEntry) -> Option<RegistryEntry> {
        let replaced = self.entries.insert(entry.name.clone(), entry);
        if let Some(ref old) = replaced {
            debug!("Replaced registry entry '{}'", old.name);
        }
        replaced
    }

    /// Remove an entry by name.
    pub fn remove(&mut self, name: &str) -> Option<RegistryEntry> {
        self.entries.remove(name)
    }

    /// Get an entry by name.
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads and writes the registry file at an explicit path.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the fixed user-level location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(config::global_dir()?.join(REGISTRY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry. A missing file is an empty registry.
    pub fn load(&self) -> Result<Registry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No registry at {:?}, starting empty", self.path);
                return Ok(Registry::default());
            }
            Err(e) => return Err(NopkgError::io(&self.path, e)),
        };

        let mut registry = Registry::default();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let entry = RegistryEntry::parse_line(line).map_err(|reason| NopkgError::Parse {
                path: self.path.clone(),
                line: idx + 1,
                reason,
            })?;
            registry.upsert(entry);
        }

        debug!("Loaded {} registry entries from {:?}", registry.len(), self.path);
        Ok(registry)
    }

    /// Save the registry, replacing the file atomically.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        let mut content = String::from(HEADER);
        content.push('\n');
        for entry in registry.entries() {
            content.push_str(&entry.to_line()?);
            content.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| NopkgError::io(parent, e))?;
        }

        // Write to a temporary file first, then rename for atomicity
        let temp_path = self.path.with_extension("txt.tmp");

        let mut file = fs::File::create(&temp_path).map_err(|e| NopkgError::io(&temp_path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| NopkgError::io(&temp_path, e))?;
        file.sync_all().map_err(|e| NopkgError::io(&temp_path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| NopkgError::io(&self.path, e))?;

        info!("Saved {} registry entries to {:?}", registry.len(), self.path);
        Ok(())
    }
}
