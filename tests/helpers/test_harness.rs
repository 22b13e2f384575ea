use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use nopkg::{Installer, ModuleManager, RegistryStore};

/// Isolated source tree, package directory and registry file.
pub struct TestHarness {
    pub temp_dir: TempDir,
    pub manager: ModuleManager,
    pub installer: Installer,
}

impl TestHarness {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let site = temp_dir.path().join("site-packages");
        std::fs::create_dir_all(&site)?;

        let store = RegistryStore::new(temp_dir.path().join("home").join("registry.txt"));

        Ok(Self {
            manager: ModuleManager::new(store),
            installer: Installer::new(site),
            temp_dir,
        })
    }

    /// Write a file under `src/`, creating parent directories.
    pub fn create_source(&self, path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.src_dir().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    pub fn src_dir(&self) -> PathBuf {
        self.temp_dir.path().join("src")
    }

    pub fn site(&self) -> &Path {
        self.installer.target_dir()
    }

    pub fn store(&self) -> &RegistryStore {
        self.manager.store()
    }
}

/// Switches the process working directory and restores it on drop.
///
/// Only tests that pass relative paths should use this; every other test
/// works with absolute paths and is unaffected.
pub struct CurrentDirGuard {
    previous: PathBuf,
}

impl CurrentDirGuard {
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        Ok(Self { previous })
    }
}

impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}
