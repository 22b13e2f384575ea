use anyhow::Result;
use chrono::{TimeZone, Utc};
use std::fs;
use std::path::PathBuf;

use nopkg::{InstallMode, NopkgError, Registry, RegistryEntry, RegistryStore};

use crate::helpers::test_harness::TestHarness;

fn entry(name: &str, mode: InstallMode) -> RegistryEntry {
    let mut entry = RegistryEntry::new(
        name.to_string(),
        PathBuf::from(format!("/home/dev/src/{}.py", name)),
        mode,
        PathBuf::from(format!("/opt/site-packages/{}.py", name)),
    );
    entry.installed_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap();
    entry
}

#[test]
fn test_save_load_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = RegistryStore::new(dir.path().join("registry.txt"));

    let mut registry = Registry::default();
    registry.upsert(entry("alpha", InstallMode::Copy));
    registry.upsert(entry("beta", InstallMode::Editable));
    let mut precise = entry("gamma", InstallMode::Copy);
    precise.installed_at = Utc::now();
    registry.upsert(precise);

    store.save(&registry)?;
    assert_eq!(store.load()?, registry);
    Ok(())
}

#[test]
fn test_registry_file_is_line_per_module() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = RegistryStore::new(dir.path().join("registry.txt"));

    let mut registry = Registry::default();
    registry.upsert(entry("beta", InstallMode::Editable));
    registry.upsert(entry("alpha", InstallMode::Copy));
    store.save(&registry)?;

    let content = fs::read_to_string(store.path())?;
    let records: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(
        records,
        vec![
            "alpha|/home/dev/src/alpha.py|copy|/opt/site-packages/alpha.py|2024-03-09T14:30:00Z",
            "beta|/home/dev/src/beta.py|dev|/opt/site-packages/beta.py|2024-03-09T14:30:00Z",
        ]
    );
    Ok(())
}

#[test]
fn test_corrupt_registry_fails_operations() -> Result<()> {
    let h = TestHarness::new()?;
    fs::create_dir_all(h.store().path().parent().unwrap())?;
    fs::write(h.store().path(), "broken line without separators\n")?;

    let err = h.manager.list().unwrap_err();
    assert!(matches!(err, NopkgError::Parse { line: 1, .. }));
    assert_eq!(err.exit_code(), 5);
    Ok(())
}

#[test]
fn test_list_is_ordered_by_name() -> Result<()> {
    let h = TestHarness::new()?;
    for name in ["zebra", "apple", "mango"] {
        let src = h.create_source(&format!("{}.py", name), "")?;
        h.manager.install(&h.installer, &src, InstallMode::Copy, None)?;
    }

    let names: Vec<String> = h.manager.list()?.into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["apple", "mango", "zebra"]);
    Ok(())
}

#[test]
fn test_registry_persists_across_managers() -> Result<()> {
    let h = TestHarness::new()?;
    let src = h.create_source("persisted.py", "")?;
    h.manager.install(&h.installer, &src, InstallMode::Copy, None)?;

    let reopened = nopkg::ModuleManager::new(RegistryStore::new(h.store().path()));
    assert_eq!(reopened.info("persisted")?.mode, InstallMode::Copy);
    Ok(())
}
