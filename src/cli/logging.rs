//! Diagnostic logging for the CLI.
//!
//! The chat screen owns the terminal, so events go to `lucent.log` in the
//! data directory instead of stderr.

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::persistence::default_data_dir;

const LOG_FILE_NAME: &str = "lucent.log";

/// Filter for a `-v` count; `RUST_LOG` wins when set.
pub fn filter_for_verbosity(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbose)))
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn default_log_path() -> Option<PathBuf> {
    default_data_dir().map(|dir| dir.join(LOG_FILE_NAME))
}

/// Install the global subscriber, appending to `path`.
pub fn init_file_logging(path: &Path, verbose: u8) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_for_verbosity(verbose))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| -> Box<dyn Error> { err })?;
    Ok(())
}
