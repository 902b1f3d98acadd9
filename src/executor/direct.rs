// Direct executor: spawns an absolute program path with no shell in between

use crate::executor::spawn::spawn_and_wait;
use crate::executor::types::{CommandSpec, TerminationOutcome};
use crate::executor::{ExecutorConfig, Result};
use std::process::Command;
use tracing::debug;

/// Runs a program directly with inherited stdio
#[derive(Debug, Clone)]
pub struct DirectExecutor {
    flush_stdout: bool,
}

impl DirectExecutor {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            flush_stdout: config.flush_stdout,
        }
    }

    /// True iff the child exited normally with status 0
    pub fn run(&self, command: &CommandSpec) -> bool {
        match self.outcome(command) {
            Ok(outcome) => outcome.success(),
            Err(e) => {
                debug!(command = %command, error = %e, "direct exec failed");
                false
            }
        }
    }

    /// Count-plus-values form; a negative or mismatched count fails without spawning
    pub fn run_counted<S: AsRef<str>>(&self, count: isize, values: &[S]) -> bool {
        match CommandSpec::from_counted(count, values) {
            Ok(command) => self.run(&command),
            Err(e) => {
                debug!(count, error = %e, "rejected command before spawn");
                false
            }
        }
    }

    pub fn outcome(&self, command: &CommandSpec) -> Result<TerminationOutcome> {
        command.validate_absolute()?;

        let mut cmd = Command::new(command.program_os());
        cmd.args(command.args());

        spawn_and_wait(&command.to_string(), &mut cmd, self.flush_stdout)
    }
}

impl Default for DirectExecutor {
    fn default() -> Self {
        Self::new(&ExecutorConfig::default())
    }
}
