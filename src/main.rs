use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use nopkg::cli::{Cli, Commands};
use nopkg::config::{self, Config};
use nopkg::logging::{init_early_logging, init_logging};
use nopkg::{ModuleManager, NopkgError, RegistryStore};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .chain()
                .find_map(|e| e.downcast_ref::<NopkgError>())
                .map(NopkgError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let global_dir = config::global_dir()?;

    // Load configuration (if available, otherwise use defaults)
    let config = match Config::load(&global_dir) {
        Ok(config) => config,
        Err(e) => {
            init_early_logging();
            return Err(e);
        }
    };

    // The guard must be held until exit so file logs are flushed
    let _logging_guard = init_logging(&config.logging, &global_dir)?;
    tracing::debug!("Using nopkg directory {}", global_dir.display());

    let manager = ModuleManager::new(RegistryStore::open_default()?);

    match cli.command {
        Commands::Install { source, dev, name } => {
            nopkg::commands::install::run(&manager, &config, &source, dev, name.as_deref())?;
        }
        Commands::List { json } => {
            nopkg::commands::list::run(&manager, json)?;
        }
        Commands::Info { name, json } => {
            nopkg::commands::info::run(&manager, &name, json)?;
        }
        Commands::Update { name } => {
            nopkg::commands::update::run(&manager, &name)?;
        }
        Commands::Uninstall { name } => {
            nopkg::commands::uninstall::run(&manager, &name)?;
        }
    }

    Ok(())
}
