use anyhow::Result;
use std::path::Path;

use crate::analysis::{analyze_file, usage_examples};
use crate::config::Config;
use crate::installer::Installer;
use crate::interpreter::resolve_target_dir;
use crate::manager::ModuleManager;
use crate::registry::InstallMode;

pub fn run(
    manager: &ModuleManager,
    config: &Config,
    source: &Path,
    dev: bool,
    name: Option<&str>,
) -> Result<()> {
    let target_dir = resolve_target_dir(&config.install)?;
    let installer = Installer::new(target_dir);
    let mode = InstallMode::from_dev_flag(dev);

    let entry = manager.install(&installer, source, mode, name)?;

    println!("Successfully installed module '{}' ({})", entry.name, entry.mode);
    println!("  -> {}", entry.install_path.display());

    if config.install.show_usage && entry.source_path.is_file() {
        let analysis = analyze_file(&entry.source_path);
        if !analysis.is_empty() {
            println!("\nUsage:");
            for line in usage_examples(&entry.name, &analysis) {
                if line.starts_with('#') {
                    println!("\n{}", line);
                } else {
                    println!("  {}", line);
                }
            }
        }
    }

    Ok(())
}
