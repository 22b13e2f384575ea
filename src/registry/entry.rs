//! Registry records and their line encoding.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{NopkgError, Result};

/// Field separator in the registry file.
pub const FIELD_SEPARATOR: char = '|';

const FIELD_COUNT: usize = 5;

/// How a module was placed into the package directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Files were copied into the package directory.
    Copy,
    /// A `.pth` redirect points the interpreter at the live source.
    Editable,
}

impl InstallMode {
    /// Registry spelling of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMode::Copy => "copy",
            InstallMode::Editable => "dev",
        }
    }

    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            InstallMode::Editable
        } else {
            InstallMode::Copy
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMode::Copy => write!(f, "copy"),
            InstallMode::Editable => write!(f, "editable"),
        }
    }
}

impl FromStr for InstallMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "copy" => Ok(InstallMode::Copy),
            "dev" | "editable" => Ok(InstallMode::Editable),
            other => Err(format!("unknown install mode '{}'", other)),
        }
    }
}

/// One installed module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Importable module name, unique in the registry
    pub name: String,
    /// Absolute path to the original file or directory
    pub source_path: PathBuf,
    /// Copy or editable
    pub mode: InstallMode,
    /// Copied file/tree, or the redirect file for editable installs
    pub install_path: PathBuf,
    /// When the module was last (re)installed
    pub installed_at: DateTime<Utc>,
}

impl RegistryEntry {
    /// Create an entry stamped with the current time.
    pub fn new(name: String, source_path: PathBuf, mode: InstallMode, install_path: PathBuf) -> Self {
        Self {
            name,
            source_path,
            mode,
            install_path,
            installed_at: Utc::now(),
        }
    }

    /// The package directory this entry was installed into.
    pub fn target_dir(&self) -> Option<&Path> {
        self.install_path.parent()
    }

    /// Check if the original source still exists.
    pub fn source_exists(&self) -> bool {
        self.source_path.exists()
    }

    /// Check if the installed artifact is present.
    pub fn artifact_exists(&self) -> bool {
        crate::installer::artifact_exists(&self.install_path)
    }

    /// Encode as a single registry line (without the newline).
    pub fn to_line(&self) -> Result<String> {
        let source = self.path_field(&self.source_path)?;
        let install = self.path_field(&self.install_path)?;
        check_field(&self.name, &self.name)?;
        let sep = FIELD_SEPARATOR;

        Ok(format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.name,
            source,
            self.mode.as_str(),
            install,
            self.installed_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ))
    }

    /// Decode a registry line. The error is a human-readable reason.
    pub fn parse_line(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            ));
        }

        let name = fields[0];
        if name.is_empty() {
            return Err("empty module name".to_string());
        }

        let source_path = PathBuf::from(fields[1]);
        if !source_path.is_absolute() {
            return Err(format!("source path '{}' is not absolute", fields[1]));
        }

        let mode = fields[2].parse::<InstallMode>()?;

        let install_path = PathBuf::from(fields[3]);
        if !install_path.is_absolute() {
            return Err(format!("install path '{}' is not absolute", fields[3]));
        }

        let installed_at = DateTime::parse_from_rfc3339(fields[4])
            .map_err(|e| format!("invalid timestamp '{}': {}", fields[4], e))?
            .with_timezone(&Utc);

        Ok(Self {
            name: name.to_string(),
            source_path,
            mode,
            install_path,
            installed_at,
        })
    }

    fn path_field<'a>(&self, path: &'a Path) -> Result<&'a str> {
        let s = path.to_str().ok_or_else(|| NopkgError::InvalidEntry {
            name: self.name.clone(),
            reason: format!("path {} is not valid UTF-8", path.display()),
        })?;
        check_field(&self.name, s)?;
        Ok(s)
    }
}

fn check_field(name: &str, value: &str) -> Result<()> {
    if value.contains(FIELD_SEPARATOR) || value.contains('\n') || value.contains('\r') {
        return Err(NopkgError::InvalidEntry {
            name: name.to_string(),
            reason: format!("'{}' contains '|' or a line break", value),
        });
    }
    Ok(())
}
