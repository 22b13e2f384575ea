use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nopkg")]
#[command(author, version, about = "Install Python modules without packaging setup")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install a Python module from a file or directory
    Install {
        /// Path to a .py file or a package directory
        source: PathBuf,

        /// Development mode: link to the source instead of copying it
        #[arg(short = 'e', long = "dev")]
        dev: bool,

        /// Module name (defaults to the file stem or directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all modules installed by nopkg
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show information about an installed module
    Info {
        /// Name of the module
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reinstall a module from its original source
    Update {
        /// Name of the module
        name: String,
    },

    /// Uninstall a module installed by nopkg
    Uninstall {
        /// Name of the module
        name: String,
    },
}
