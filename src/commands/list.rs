use anyhow::Result;

use super::TIME_FORMAT;
use crate::manager::ModuleManager;

pub fn run(manager: &ModuleManager, json: bool) -> Result<()> {
    let entries = manager.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No modules installed by nopkg");
        return Ok(());
    }

    println!("Modules installed by nopkg:\n");
    println!(
        "{:<20} {:<9} {:<45} {:<23}",
        "NAME", "MODE", "SOURCE", "INSTALLED"
    );
    println!("{}", "-".repeat(100));

    for entry in &entries {
        let source = truncate_path(&entry.source_path.display().to_string(), 43);
        let source = if entry.artifact_exists() {
            source
        } else {
            format!("{} (missing)", source)
        };

        println!(
            "{:<20} {:<9} {:<45} {:<23}",
            truncate_string(&entry.name, 18),
            entry.mode.to_string(),
            source,
            entry.installed_at.format(TIME_FORMAT).to_string()
        );
    }

    println!("\nTotal: {} module(s)", entries.len());

    Ok(())
}

/// Truncate a string to a maximum length, adding "..." if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Truncate a path to a maximum length, showing the end.
fn truncate_path(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().skip(len - (max_len - 3)).collect();
        format!("...{}", kept)
    } else {
        s.chars().skip(len - max_len).collect()
    }
}
