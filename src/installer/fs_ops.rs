//! Filesystem helpers for placing and removing installed artifacts.

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

/// Recursively copy every file under `src` into `dst`.
///
/// `dst` is created if needed. When `dst` lies inside `src` the directory
/// holding it is skipped, so neither the copy nor its siblings in the
/// package directory are copied again. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;

    for entry in WalkDir::new(src)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.path() != dst && Some(e.path()) != dst.parent())
    {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            trace!("copy {:?} -> {:?}", entry.path(), target);
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Delete a file, directory tree or link.
///
/// Returns `false` when nothing was there to delete.
pub fn remove_artifact(path: &Path) -> io::Result<bool> {
    let metadata = match path.symlink_metadata() {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(true)
}

/// Check whether anything (including a dangling link) exists at `path`.
pub fn artifact_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
