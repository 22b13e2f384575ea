//! Error types shared by the registry, installer and operations.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, NopkgError>;

/// Errors that can occur while installing or managing modules.
#[derive(Error, Debug)]
pub enum NopkgError {
    /// The source file or directory does not exist.
    #[error("Source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The destination exists and was not installed by nopkg.
    #[error("Module '{name}' already exists at {} (not managed by nopkg)", path.display())]
    Conflict { name: String, path: PathBuf },

    /// The filesystem refused a write or delete.
    #[error("Permission denied: cannot write to {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// A registry line could not be parsed.
    #[error("Corrupt registry {}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// No module with this name is registered.
    #[error("Module '{name}' not found")]
    NotFound { name: String },

    /// The module name is not a valid Python identifier.
    #[error("Invalid module name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// An entry holds a value the registry format cannot store.
    #[error("Cannot record module '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },

    /// The interpreter could not report its package directory.
    #[error("Could not determine site-packages directory using '{python}': {reason}")]
    Interpreter { python: String, reason: String },

    /// The registry entry was removed but its files could not be deleted.
    #[error("Removed '{name}' from the registry but failed to delete {}: {source}", path.display())]
    Cleanup {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NopkgError {
    /// Map an I/O error on `path`, singling out permission failures.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            NopkgError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            NopkgError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            NopkgError::Io { .. } => 1,
            NopkgError::SourceNotFound { .. } => 2,
            NopkgError::Conflict { .. } => 3,
            NopkgError::PermissionDenied { .. } => 4,
            NopkgError::Parse { .. } => 5,
            NopkgError::NotFound { .. } => 6,
            NopkgError::InvalidName { .. } | NopkgError::InvalidEntry { .. } => 7,
            NopkgError::Interpreter { .. } => 8,
            NopkgError::Cleanup { .. } => 9,
        }
    }
}
