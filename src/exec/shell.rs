//! Runs command lines through a system shell (`sh -c <line>` by default).
//!
//! stdout and stderr share one OS pipe so the child's writes stay in the
//! order it made them. The child inherits the environment and gets a null
//! stdin. The blocking wait happens on tokio's blocking pool.

use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::time::Instant;

use async_trait::async_trait;
use log::{debug, warn};

use super::{CommandRunner, RunError, RunOutcome};
use crate::core::config::{DEFAULT_SHELL_FLAG, DEFAULT_SHELL_PROGRAM, ResolvedConfig};

#[derive(Debug, Clone)]
pub struct ShellRunner {
    pub program: String,
    pub flag: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL_PROGRAM, DEFAULT_SHELL_FLAG)
    }
}

impl ShellRunner {
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.shell_program.clone(), config.shell_flag.clone())
    }

    /// Spawn the shell and collect its merged output. Blocks until it exits.
    pub fn run_blocking(&self, line: &str) -> RunOutcome {
        let started = Instant::now();

        let (mut reader, writer) = match io::pipe() {
            Ok(pair) => pair,
            Err(e) => return failed(RunError::Read(e)),
        };
        let stderr_writer = match writer.try_clone() {
            Ok(w) => w,
            Err(e) => return failed(RunError::Read(e)),
        };

        // The Command holds the write ends until it is dropped; it must go
        // before reading or the read never sees EOF.
        let child = Command::new(&self.program)
            .arg(&self.flag)
            .arg(line)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(stderr_writer))
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(source) => {
                warn!("Failed to start {}: {}", self.program, source);
                return failed(RunError::Spawn {
                    program: self.program.clone(),
                    source,
                });
            }
        };

        let mut bytes = Vec::new();
        let read_error = reader.read_to_end(&mut bytes).err();
        let output = String::from_utf8_lossy(&bytes).into_owned();

        let error = match child.wait() {
            Ok(status) if status.success() => read_error.map(RunError::Read),
            Ok(status) => Some(RunError::Exit(status)),
            Err(e) => Some(RunError::Read(e)),
        };

        debug!(
            "Job {:?} finished in {}ms ({} bytes, error: {:?})",
            line,
            started.elapsed().as_millis(),
            output.len(),
            error.as_ref().map(ToString::to_string)
        );

        RunOutcome { output, error }
    }
}

fn failed(error: RunError) -> RunOutcome {
    RunOutcome {
        output: String::new(),
        error: Some(error),
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, line: &str) -> String {
        if line.trim().is_empty() {
            return String::new();
        }

        let runner = self.clone();
        let line = line.to_string();
        match tokio::task::spawn_blocking(move || runner.run_blocking(&line)).await {
            Ok(outcome) => outcome.into_text(),
            Err(e) => {
                warn!("Job task failed: {}", e);
                format!("job failed: {e}")
            }
        }
    }
}
