// Data types for Executor module

use crate::executor::{ExecutorError, Result};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitStatus;

/// Program path plus arguments, element 0 being the executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
}

impl CommandSpec {
    /// Build from an ordered sequence; fails on an empty sequence
    pub fn new<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            return Err(ExecutorError::InvalidInput(
                "command must name a program".to_string(),
            ));
        }
        Ok(Self { argv })
    }

    /// Build from an explicit argument count followed by the values.
    ///
    /// `count` must be non-negative and match `values.len()`.
    pub fn from_counted<S: AsRef<str>>(count: isize, values: &[S]) -> Result<Self> {
        if count < 0 {
            return Err(ExecutorError::InvalidInput(format!(
                "negative argument count: {}",
                count
            )));
        }
        if count as usize != values.len() {
            return Err(ExecutorError::InvalidInput(format!(
                "argument count {} does not match {} values",
                count,
                values.len()
            )));
        }
        Self::new(values.iter().map(|v| v.as_ref().to_string()))
    }

    /// Executable path (element 0)
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program path
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Check the program is an absolute path; there is no PATH search
    pub(crate) fn validate_absolute(&self) -> Result<()> {
        if Path::new(self.program()).is_absolute() {
            Ok(())
        } else {
            Err(ExecutorError::InvalidInput(format!(
                "program path must be absolute: {}",
                self.program()
            )))
        }
    }

    pub(crate) fn program_os(&self) -> &OsStr {
        OsStr::new(self.program())
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerminationOutcome {
    /// Exited through its normal path with this status
    NormalExit { code: i32 },
    /// Killed by a signal
    Signaled { signal: i32, core_dumped: bool },
    /// The child never started
    SpawnFailure,
}

impl TerminationOutcome {
    /// Classify a wait status
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return TerminationOutcome::NormalExit { code };
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return TerminationOutcome::Signaled {
                    signal,
                    core_dumped: status.core_dumped(),
                };
            }
            if let Some(signal) = status.stopped_signal() {
                return TerminationOutcome::Signaled {
                    signal,
                    core_dumped: false,
                };
            }
        }

        // Neither an exit code nor a signal: treat as abnormal.
        TerminationOutcome::Signaled {
            signal: 0,
            core_dumped: false,
        }
    }

    /// True only for a normal exit with status 0
    pub fn success(&self) -> bool {
        matches!(self, TerminationOutcome::NormalExit { code: 0 })
    }

    /// Exit code for normal exits, `-1` otherwise (for log fields)
    pub fn exit_code(&self) -> i32 {
        match self {
            TerminationOutcome::NormalExit { code } => *code,
            _ => -1,
        }
    }
}

impl std::fmt::Display for TerminationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationOutcome::NormalExit { code } => write!(f, "exited with code {}", code),
            TerminationOutcome::Signaled {
                signal,
                core_dumped: true,
            } => write!(f, "killed by signal {} (core dumped)", signal),
            TerminationOutcome::Signaled { signal, .. } => {
                write!(f, "killed by signal {}", signal)
            }
            TerminationOutcome::SpawnFailure => write!(f, "failed to spawn"),
        }
    }
}
