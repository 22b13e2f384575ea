//! Package directory resolution.
//!
//! The install target is the interpreter's `purelib` directory, unless the
//! configuration pins a directory explicitly.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::InstallConfig;
use crate::error::{NopkgError, Result};

const PURELIB_SCRIPT: &str = "import sysconfig; print(sysconfig.get_path('purelib'))";

/// How long the interpreter may take to answer.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Ask `python` for its site-packages directory.
pub fn site_packages_dir(python: &str) -> Result<PathBuf> {
    let mut command = Command::new(python);
    command.args(["-c", PURELIB_SCRIPT]);

    let output = output_with_timeout(command, QUERY_TIMEOUT)
        .map_err(|e| NopkgError::Interpreter {
            python: python.to_string(),
            reason: e.to_string(),
        })?
        .ok_or_else(|| NopkgError::Interpreter {
            python: python.to_string(),
            reason: format!("no answer within {}s", QUERY_TIMEOUT.as_secs()),
        })?;

    if !output.status.success() {
        return Err(NopkgError::Interpreter {
            python: python.to_string(),
            reason: format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let path = PathBuf::from(stdout.trim());
    if path.as_os_str().is_empty() || !path.is_dir() {
        return Err(NopkgError::Interpreter {
            python: python.to_string(),
            reason: format!("reported '{}', which is not a directory", path.display()),
        });
    }

    debug!("{} site-packages: {:?}", python, path);
    Ok(path)
}

/// Run `command` to completion, or kill it once `timeout` has passed.
///
/// Returns `None` on timeout.
fn output_with_timeout(mut command: Command, timeout: Duration) -> io::Result<Option<Output>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    let start = Instant::now();

    loop {
        match child.try_wait()? {
            Some(_) => return child.wait_with_output().map(Some),
            None if start.elapsed() >= timeout => {
                warn!("Killing {:?} after {:?}", command.get_program(), timeout);
                if let Err(e) = child.kill() {
                    debug!("kill failed: {}", e);
                }
                child.wait()?;
                return Ok(None);
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

/// Resolve the directory installs go into.
pub fn resolve_target_dir(config: &InstallConfig) -> Result<PathBuf> {
    match config.target_dir {
        Some(ref dir) => {
            debug!("Using configured target directory {:?}", dir);
            Ok(dir.clone())
        }
        None => site_packages_dir(&config.python),
    }
}
