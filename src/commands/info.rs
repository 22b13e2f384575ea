use anyhow::Result;

use super::TIME_FORMAT;
use crate::manager::ModuleManager;
use crate::registry::{InstallMode, RegistryEntry};

pub fn run(manager: &ModuleManager, name: &str, json: bool) -> Result<()> {
    let entry = manager.info(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        print_entry(&entry);
    }

    Ok(())
}

fn print_entry(entry: &RegistryEntry) {
    println!("Module: {}", entry.name);
    println!("Source: {}", entry.source_path.display());
    println!("Mode: {}", entry.mode);

    let label = match entry.mode {
        InstallMode::Copy => "Installed at",
        InstallMode::Editable => "Redirect file",
    };
    println!("{}: {}", label, entry.install_path.display());
    println!("Installed: {}", entry.installed_at.format(TIME_FORMAT));

    if !entry.source_exists() {
        println!("Status: SOURCE MISSING");
    } else if !entry.artifact_exists() {
        println!("Status: NOT INSTALLED (files missing)");
    } else {
        println!("Status: OK");
    }
}
