//! # Command Execution
//!
//! A [`CommandRunner`] turns one command line into one output string.
//! It never fails: launch errors and non-zero exits become text, because the
//! transcript is the only place they are reported.

pub mod shell;

use std::fmt;
use std::process::ExitStatus;

use async_trait::async_trait;

pub use shell::ShellRunner;

/// Why a command produced no usable output.
#[derive(Debug)]
pub enum RunError {
    /// The shell itself could not be started.
    Spawn { program: String, source: std::io::Error },
    /// Reading the merged output pipe failed.
    Read(std::io::Error),
    /// The command ran and exited unsuccessfully.
    Exit(ExitStatus),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Spawn { program, source } => {
                write!(f, "failed to start {program}: {source}")
            }
            RunError::Read(e) => write!(f, "failed to read output: {e}"),
            RunError::Exit(status) => write!(f, "{status}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Spawn { source, .. } => Some(source),
            RunError::Read(e) => Some(e),
            RunError::Exit(_) => None,
        }
    }
}

/// What a finished command left behind: whatever it printed, and the error
/// if it did not succeed.
#[derive(Debug)]
pub struct RunOutcome {
    pub output: String,
    pub error: Option<RunError>,
}

impl RunOutcome {
    /// Captured output wins; the error text is only used when nothing was printed.
    pub fn into_text(self) -> String {
        match self.error {
            Some(e) if self.output.is_empty() => e.to_string(),
            _ => self.output,
        }
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `line` and resolves with its displayable result.
    /// Empty and whitespace-only lines resolve to an empty string.
    async fn run(&self, line: &str) -> String;
}
