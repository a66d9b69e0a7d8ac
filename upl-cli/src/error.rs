//! Process-level failures of the CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the CLI before or while writing its report.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
