// Shell executor: runs a command line through `<shell> -c`

use crate::executor::spawn::spawn_and_wait;
use crate::executor::types::TerminationOutcome;
use crate::executor::{ExecutorConfig, ExecutorError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

/// Runs full command lines through a system shell
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: PathBuf,
    flush_stdout: bool,
}

impl ShellExecutor {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            shell: config.shell.clone(),
            flush_stdout: config.flush_stdout,
        }
    }

    /// Run `command`; true only if the shell started and exited with 0.
    ///
    /// A nonzero exit code is reported through a `warn` event.
    pub fn run(&self, command: &str) -> bool {
        match self.outcome(command) {
            Ok(outcome) => {
                report_failure(command, &outcome);
                outcome.success()
            }
            Err(e) => {
                debug!(command = %command, error = %e, "shell command not run");
                false
            }
        }
    }

    /// Run `command` and return how the shell ended
    pub fn outcome(&self, command: &str) -> Result<TerminationOutcome> {
        if command.is_empty() {
            return Err(ExecutorError::InvalidInput(
                "shell command is empty".to_string(),
            ));
        }

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command);

        spawn_and_wait(command, &mut cmd, self.flush_stdout)
    }
}

/// Report a failed shell outcome; successful outcomes are left to `spawn_and_wait`
pub(crate) fn report_failure(command: &str, outcome: &TerminationOutcome) {
    match outcome {
        TerminationOutcome::NormalExit { code: 0 } => {}
        TerminationOutcome::NormalExit { code } => {
            warn!(command = %command, exit_code = *code, "shell command failed");
        }
        other => {
            warn!(command = %command, outcome = %other, "shell did not exit normally");
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(&ExecutorConfig::default())
    }
}
