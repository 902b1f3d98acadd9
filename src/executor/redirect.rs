// Redirecting executor: direct exec with the child's stdout bound to a file

use crate::executor::spawn::spawn_and_wait;
use crate::executor::types::{CommandSpec, TerminationOutcome};
use crate::executor::{ExecutorConfig, ExecutorError, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, error};

/// Runs a program directly with stdout written to a file
#[derive(Debug, Clone)]
pub struct RedirectingExecutor {
    output_mode: u32,
    flush_stdout: bool,
}

impl RedirectingExecutor {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            output_mode: config.output_mode,
            flush_stdout: config.flush_stdout,
        }
    }

    /// True iff the child exited normally with status 0.
    ///
    /// `output_path` is created or truncated even when the command then fails.
    pub fn run(&self, output_path: impl AsRef<Path>, command: &CommandSpec) -> bool {
        let output_path = output_path.as_ref();
        match self.outcome(output_path, command) {
            Ok(outcome) => outcome.success(),
            Err(e) => {
                debug!(
                    command = %command,
                    output = %output_path.display(),
                    error = %e,
                    "redirected exec failed"
                );
                false
            }
        }
    }

    /// Count-plus-values form; at least one value is required
    pub fn run_counted<S: AsRef<str>>(
        &self,
        output_path: impl AsRef<Path>,
        count: isize,
        values: &[S],
    ) -> bool {
        match CommandSpec::from_counted(count, values) {
            Ok(command) => self.run(output_path, &command),
            Err(e) => {
                debug!(count, error = %e, "rejected command before spawn");
                false
            }
        }
    }

    pub fn outcome(&self, output_path: &Path, command: &CommandSpec) -> Result<TerminationOutcome> {
        if output_path.as_os_str().is_empty() {
            return Err(ExecutorError::InvalidInput(
                "output path is empty".to_string(),
            ));
        }
        command.validate_absolute()?;

        let file = self.open_output(output_path)?;

        let mut cmd = Command::new(command.program_os());
        cmd.args(command.args()).stdout(Stdio::from(file));

        // The descriptor moves into `cmd`; it closes in the parent when `cmd` drops.
        spawn_and_wait(&command.to_string(), &mut cmd, self.flush_stdout)
    }

    /// Write-only, create, truncate
    fn open_output(&self, path: &Path) -> Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.output_mode);
        }

        options.open(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "failed to open output file");
            ExecutorError::OutputOpen {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

impl Default for RedirectingExecutor {
    fn default() -> Self {
        Self::new(&ExecutorConfig::default())
    }
}
