use anyhow::Result;

use crate::manager::ModuleManager;

pub fn run(manager: &ModuleManager, name: &str) -> Result<()> {
    let entry = manager.update(name)?;

    println!("Successfully updated module '{}'", entry.name);
    println!("  from {}", entry.source_path.display());

    Ok(())
}
