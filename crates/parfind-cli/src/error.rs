//! CLI error types with associated exit codes.

use std::fmt;
use std::path::PathBuf;

/// All error conditions the `parfind` binary can produce.
///
/// The `Display` rendering is what gets printed to stderr;
/// [`CliError::exit_code`] is the process exit code. Every failure maps to
/// exit code 1 — the binary's contract distinguishes only success from
/// failure.
#[derive(Debug)]
pub enum CliError {
    /// The operations file could not be read.
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error message.
        detail: String,
    },
    /// The operations file is malformed.
    Parse {
        /// The path being parsed.
        path: PathBuf,
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong.
        detail: String,
    },
}

impl CliError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, detail } => {
                write!(f, "cannot read {}: {detail}", path.display())
            }
            CliError::Parse { path, line, detail } => {
                write!(f, "{}:{line}: {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for CliError {}
