// Main Executor implementation

use crate::executor::config::ExecutorConfig;
use crate::executor::direct::DirectExecutor;
use crate::executor::redirect::RedirectingExecutor;
use crate::executor::shell::{report_failure, ShellExecutor};
use crate::executor::types::{CommandSpec, TerminationOutcome};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// One execution to perform
#[derive(Debug, Clone)]
pub enum Request {
    Shell { command: String },
    Direct { command: CommandSpec },
    Redirect { output: PathBuf, command: CommandSpec },
}

impl Request {
    pub fn strategy(&self) -> &'static str {
        match self {
            Request::Shell { .. } => "shell",
            Request::Direct { .. } => "direct",
            Request::Redirect { .. } => "redirect",
        }
    }
}

/// Result of one request, suitable for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub strategy: &'static str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TerminationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The three executors built from one configuration
pub struct Executor {
    shell: ShellExecutor,
    direct: DirectExecutor,
    redirect: RedirectingExecutor,
}

impl Executor {
    pub fn new(config: &ExecutorConfig) -> Self {
        debug!(
            shell = %config.shell.display(),
            output_mode = %format!("{:o}", config.output_mode),
            flush_stdout = config.flush_stdout,
            "initializing executor"
        );

        Self {
            shell: ShellExecutor::new(config),
            direct: DirectExecutor::new(config),
            redirect: RedirectingExecutor::new(config),
        }
    }

    /// Run a request and collect its outcome.
    ///
    /// `success` always equals what the matching executor's `run` would return.
    pub fn execute(&self, request: &Request) -> ExecutionReport {
        let strategy = request.strategy();
        info!(strategy, "executing request");

        let result = match request {
            Request::Shell { command } => self.shell.outcome(command),
            Request::Direct { command } => self.direct.outcome(command),
            Request::Redirect { output, command } => self.redirect.outcome(output, command),
        };

        match result {
            Ok(outcome) => {
                if let Request::Shell { command } = request {
                    report_failure(command, &outcome);
                }
                ExecutionReport {
                    strategy,
                    success: outcome.success(),
                    outcome: Some(outcome),
                    error: None,
                }
            }
            Err(e) => ExecutionReport {
                strategy,
                success: false,
                outcome: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(&ExecutorConfig::default())
    }
}
