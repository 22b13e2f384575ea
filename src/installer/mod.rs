//! Places modules into a package directory.
//!
//! Two strategies are supported:
//! - **Copy**: the file, or the whole directory tree, is copied into the
//!   package directory. Later edits to the source are not seen.
//! - **Editable**: a `nopkg_<name>.pth` redirect file holding the source's
//!   parent directory is written. The interpreter adds that directory to its
//!   import path at startup, so the live source is imported.
//!
//! The installer only touches the filesystem; recording the result in the
//! registry is the caller's job.

mod fs_ops;

pub use fs_ops::{artifact_exists, copy_tree, remove_artifact};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{NopkgError, Result};
use crate::registry::{InstallMode, RegistryEntry};

/// Marker file that makes a directory an importable package.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Prefix of redirect files written for editable installs.
pub const REDIRECT_PREFIX: &str = "nopkg_";

const STAGING_SUFFIX: &str = ".partial";

/// Installs sources into one target package directory.
#[derive(Debug, Clone)]
pub struct Installer {
    target_dir: PathBuf,
}

impl Installer {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Install `source` and describe the result.
    ///
    /// `prior` is the registry entry currently holding the module name, if
    /// any. Its artifact is replaced; any other existing destination is a
    /// conflict and nothing is touched. The new artifact is built next to
    /// the destination first, so a failed install leaves `prior` in place.
    pub fn install(
        &self,
        source: &Path,
        mode: InstallMode,
        name: Option<&str>,
        prior: Option<&RegistryEntry>,
    ) -> Result<RegistryEntry> {
        let source = resolve_source(source)?;
        let is_dir = source.is_dir();

        let derived = derive_module_name(&source)?;
        let name = name.map(str::to_string).unwrap_or_else(|| derived.clone());
        validate_module_name(&name)?;

        let dest = self.destination(&source, &name, mode, is_dir);
        self.check_conflicts(&name, mode, &dest, prior)?;

        fs::create_dir_all(&self.target_dir).map_err(|e| NopkgError::io(&self.target_dir, e))?;

        let staging = self.staging_path(&name);
        remove_artifact(&staging).map_err(|e| NopkgError::io(&staging, e))?;
        if let Err(e) = self.stage(&source, &staging, mode, is_dir) {
            if let Err(cleanup) = remove_artifact(&staging) {
                warn!("Failed to remove staging path {:?}: {}", staging, cleanup);
            }
            return Err(e);
        }

        if let Some(prior) = prior {
            if remove_artifact(&prior.install_path)
                .map_err(|e| NopkgError::io(&prior.install_path, e))?
            {
                debug!("Removed previous install of '{}' at {:?}", name, prior.install_path);
            }
        }
        fs::rename(&staging, &dest).map_err(|e| NopkgError::io(&dest, e))?;

        if mode == InstallMode::Editable && name != derived {
            warn!(
                "Editable install of {:?} is importable as '{}', not '{}'",
                source, derived, name
            );
        }

        info!("Installed '{}' ({}) at {:?}", name, mode, dest);
        Ok(RegistryEntry::new(name, source, mode, dest))
    }

    /// Refuse to overwrite or shadow anything nopkg does not manage.
    ///
    /// Editable installs also collide with a plain `<name>.py` or `<name>/`
    /// in the target directory, which would win over the redirected path.
    fn check_conflicts(
        &self,
        name: &str,
        mode: InstallMode,
        dest: &Path,
        prior: Option<&RegistryEntry>,
    ) -> Result<()> {
        let mut candidates = vec![dest.to_path_buf()];
        if mode == InstallMode::Editable {
            candidates.push(self.target_dir.join(name));
            candidates.push(self.target_dir.join(format!("{}.py", name)));
        }

        for path in candidates {
            let managed = prior.is_some_and(|p| p.install_path == path);
            if artifact_exists(&path) && !managed {
                return Err(NopkgError::Conflict {
                    name: name.to_string(),
                    path,
                });
            }
        }
        Ok(())
    }

    /// Build the artifact for `source` at `staging`.
    fn stage(&self, source: &Path, staging: &Path, mode: InstallMode, is_dir: bool) -> Result<()> {
        match mode {
            InstallMode::Copy if is_dir => {
                let copied = copy_tree(source, staging).map_err(|e| NopkgError::io(staging, e))?;
                let marker = staging.join(PACKAGE_MARKER);
                if !marker.exists() {
                    fs::write(&marker, "").map_err(|e| NopkgError::io(&marker, e))?;
                    debug!("Created {:?}", marker);
                }
                debug!("Copied {} files from {:?} to {:?}", copied, source, staging);
            }
            InstallMode::Copy => {
                fs::copy(source, staging).map_err(|e| NopkgError::io(staging, e))?;
                debug!("Copied {:?} to {:?}", source, staging);
            }
            InstallMode::Editable => {
                let parent = source.parent().ok_or_else(|| NopkgError::InvalidName {
                    name: source.display().to_string(),
                    reason: "source has no parent directory".to_string(),
                })?;
                fs::write(staging, format!("{}\n", parent.display()))
                    .map_err(|e| NopkgError::io(staging, e))?;
                debug!("Wrote redirect {:?} -> {:?}", staging, parent);
            }
        }
        Ok(())
    }

    /// Scratch location for an artifact under construction.
    fn staging_path(&self, name: &str) -> PathBuf {
        self.target_dir
            .join(format!(".{}{}{}", REDIRECT_PREFIX, name, STAGING_SUFFIX))
    }

    /// Where `name` lands in the target directory for the given mode.
    pub fn destination(&self, source: &Path, name: &str, mode: InstallMode, is_dir: bool) -> PathBuf {
        match mode {
            InstallMode::Editable => self
                .target_dir
                .join(format!("{}{}.pth", REDIRECT_PREFIX, name)),
            InstallMode::Copy if is_dir => self.target_dir.join(name),
            InstallMode::Copy => {
                let ext = source
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("py");
                self.target_dir.join(format!("{}.{}", name, ext))
            }
        }
    }
}

/// Check that `source` exists and return its canonical path.
///
/// Relative forms such as `.` or `pkg/..` and symlinks resolve to the real
/// file or directory, which is what module names are derived from.
pub fn resolve_source(source: &Path) -> Result<PathBuf> {
    if !source.exists() {
        return Err(NopkgError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }
    fs::canonicalize(source).map_err(|e| NopkgError::io(source, e))
}

/// Module name for a source: file stem for files, directory name otherwise.
pub fn derive_module_name(source: &Path) -> Result<String> {
    let raw = if source.is_dir() {
        source.file_name()
    } else {
        source.file_stem()
    };

    raw.and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| NopkgError::InvalidName {
            name: source.display().to_string(),
            reason: "cannot derive a module name from this path".to_string(),
        })
}

/// Check that `name` is importable: a Python identifier.
pub fn validate_module_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| NopkgError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("name is empty")),
        Some(c) if !(c.is_alphabetic() || c == '_') => {
            return Err(invalid("must start with a letter or underscore"))
        }
        _ => {}
    }

    if chars.any(|c| !(c.is_alphanumeric() || c == '_')) {
        return Err(invalid("only letters, digits and underscores are allowed"));
    }

    Ok(())
}
