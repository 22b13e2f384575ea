use anyhow::Result;
use std::fs;
use std::path::Path;

use nopkg::{InstallMode, NopkgError};

use crate::helpers::test_harness::{CurrentDirGuard, TestHarness};

#[test]
fn test_install_then_list_yields_one_entry() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("string_utils.py", "def shout(text):\n    return text.upper()\n")?;

    h.manager.install(&h.installer, &src, InstallMode::Copy, None)?;

    let entries = h.manager.list()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "string_utils");
    assert_eq!(entries[0].source_path, fs::canonicalize(&src)?);
    Ok(())
}

#[test]
fn test_copy_install_is_isolated_from_source_edits() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("config_vals.py", "LEVEL = 1\n")?;

    let entry = h.manager.install(&h.installer, &src, InstallMode::Copy, None)?;
    fs::write(&src, "LEVEL = 2\n")?;

    assert_eq!(fs::read_to_string(&entry.install_path)?, "LEVEL = 1\n");
    Ok(())
}

#[test]
fn test_editable_install_sees_source_edits() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("live.py", "VALUE = 'old'\n")?;

    let entry = h.manager.install(&h.installer, &src, InstallMode::Editable, None)?;
    fs::write(&src, "VALUE = 'new'\n")?;

    // The redirect names the live source directory, so the interpreter
    // imports the edited file directly.
    let redirect = fs::read_to_string(&entry.install_path)?;
    let linked_dir = std::path::PathBuf::from(redirect.trim_end());
    assert_eq!(
        fs::read_to_string(linked_dir.join("live.py"))?,
        "VALUE = 'new'\n"
    );
    assert!(!h.site().join("live.py").exists());
    Ok(())
}

#[test]
fn test_uninstall_removes_files_and_entry() -> Result<()> {
    let h = TestHarness::new()?;
    let pkg = h.src_dir().join("shapes");
    h.create_source("shapes/circle.py", "R = 1\n")?;
    h.create_source("shapes/icons/circle.svg", "<svg/>")?;

    let entry = h.manager.install(&h.installer, &pkg, InstallMode::Copy, None)?;
    assert!(entry.install_path.join("icons").join("circle.svg").is_file());
    assert!(entry.install_path.join("__init__.py").is_file());

    let outcome = h.manager.uninstall("shapes")?;
    assert!(outcome.artifact_removed);
    assert!(!entry.install_path.exists());
    assert!(h.manager.list()?.is_empty());
    Ok(())
}

#[test]
fn test_uninstall_editable_removes_redirect_only() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("tool.py", "")?;

    let entry = h.manager.install(&h.installer, &src, InstallMode::Editable, None)?;
    h.manager.uninstall("tool")?;

    assert!(!entry.install_path.exists());
    assert!(src.exists());
    Ok(())
}

#[test]
fn test_uninstall_unknown_name() -> Result<()> {
    let h = TestHarness::new()?;
    let err = h.manager.uninstall("nothing_here").unwrap_err();
    assert!(matches!(err, NopkgError::NotFound { .. }));
    Ok(())
}

#[test]
fn test_uninstall_with_artifact_already_gone() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("gone.py", "")?;

    let entry = h.manager.install(&h.installer, &src, InstallMode::Copy, None)?;
    fs::remove_file(&entry.install_path)?;

    let outcome = h.manager.uninstall("gone")?;
    assert!(!outcome.artifact_removed);
    assert!(h.manager.list()?.is_empty());
    Ok(())
}

#[test]
fn test_update_editable_refreshes_timestamp_only() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("dev_mod.py", "X = 1\n")?;

    let before = h.manager.install(&h.installer, &src, InstallMode::Editable, None)?;
    let redirect_before = fs::read_to_string(&before.install_path)?;
    std::thread::sleep(std::time::Duration::from_millis(5));

    let after = h.manager.update("dev_mod")?;

    assert_eq!(after.install_path, before.install_path);
    assert_eq!(fs::read_to_string(&after.install_path)?, redirect_before);
    assert!(after.installed_at > before.installed_at);
    assert_eq!(h.manager.info("dev_mod")?.installed_at, after.installed_at);
    Ok(())
}

#[test]
fn test_update_copy_picks_up_source_changes() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("versioned.py", "V = 1\n")?;

    let entry = h.manager.install(&h.installer, &src, InstallMode::Copy, None)?;
    fs::write(&src, "V = 2\n")?;
    h.manager.update("versioned")?;

    assert_eq!(fs::read_to_string(&entry.install_path)?, "V = 2\n");
    Ok(())
}

#[test]
fn test_update_with_missing_source() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("temp_mod.py", "")?;

    h.manager.install(&h.installer, &src, InstallMode::Copy, None)?;
    fs::remove_file(&src)?;

    let err = h.manager.update("temp_mod").unwrap_err();
    assert!(matches!(err, NopkgError::SourceNotFound { .. }));
    // the installed copy and entry are untouched
    assert!(h.manager.info("temp_mod")?.install_path.exists());
    Ok(())
}

#[test]
fn test_install_conflicts_with_unmanaged_module() -> Result<()> {
    let h = TestHarness::new()?;
    fs::write(h.site().join("requests.py"), "# third party\n")?;
    let src = h.create_source("requests.py", "# mine\n")?;

    let err = h
        .manager
        .install(&h.installer, &src, InstallMode::Copy, None)
        .unwrap_err();

    assert!(matches!(err, NopkgError::Conflict { .. }));
    assert_eq!(fs::read_to_string(h.site().join("requests.py"))?, "# third party\n");
    assert!(h.manager.list()?.is_empty());
    Ok(())
}

#[test]
fn test_reinstall_overwrites_managed_entry() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("again.py", "A = 1\n")?;

    h.manager.install(&h.installer, &src, InstallMode::Copy, None)?;
    fs::write(&src, "A = 2\n")?;
    let entry = h.manager.install(&h.installer, &src, InstallMode::Editable, None)?;

    let entries = h.manager.list()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mode, InstallMode::Editable);
    assert!(!h.site().join("again.py").exists());
    assert!(entry.install_path.exists());
    Ok(())
}

#[test]
fn test_editable_install_conflicts_with_unmanaged_module() -> Result<()> {
    let h = TestHarness::new()?;
    fs::write(h.site().join("requests.py"), "# third party\n")?;
    let src = h.create_source("requests.py", "# mine\n")?;

    let err = h
        .manager
        .install(&h.installer, &src, InstallMode::Editable, None)
        .unwrap_err();

    assert!(matches!(err, NopkgError::Conflict { .. }));
    assert!(!h.site().join("nopkg_requests.pth").exists());
    assert!(h.manager.list()?.is_empty());
    Ok(())
}

#[test]
fn test_install_current_directory() -> Result<()> {
    let h = TestHarness::new()?;
    h.create_source("mathkit/stats.py", "def mean(values):\n    pass\n")?;
    let pkg = h.src_dir().join("mathkit");

    let entry = {
        let _cwd = CurrentDirGuard::enter(&pkg)?;
        h.manager
            .install(&h.installer, Path::new("."), InstallMode::Copy, None)?
    };

    assert_eq!(entry.name, "mathkit");
    assert_eq!(entry.source_path, fs::canonicalize(&pkg)?);
    assert!(h.site().join("mathkit").join("stats.py").is_file());
    Ok(())
}

#[test]
fn test_install_parent_relative_path() -> Result<()> {
    let h = TestHarness::new()?;
    h.create_source("mathkit/inner/deep.py", "")?;
    let via_parent = h.src_dir().join("mathkit").join("inner").join("..");

    let entry = h
        .manager
        .install(&h.installer, &via_parent, InstallMode::Editable, None)?;

    assert_eq!(entry.name, "mathkit");
    assert_eq!(entry.install_path, h.site().join("nopkg_mathkit.pth"));
    assert_eq!(
        fs::read_to_string(&entry.install_path)?,
        format!("{}\n", fs::canonicalize(h.src_dir())?.display())
    );
    Ok(())
}
