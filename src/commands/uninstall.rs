use anyhow::Result;

use crate::manager::ModuleManager;

pub fn run(manager: &ModuleManager, name: &str) -> Result<()> {
    let outcome = manager.uninstall(name)?;

    println!("Successfully uninstalled module '{}'", outcome.entry.name);
    if !outcome.artifact_removed {
        println!(
            "Note: {} was already gone; removed the registry entry only.",
            outcome.entry.install_path.display()
        );
    }

    Ok(())
}
