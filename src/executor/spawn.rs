// Spawn-and-wait primitive shared by all executors

use crate::executor::types::TerminationOutcome;
use crate::executor::{ExecutorError, Result};
use std::io::Write;
use std::process::Command;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Flush buffered parent stdout so it cannot interleave with the child's
pub(crate) fn flush_stdout() {
    if let Err(e) = std::io::stdout().flush() {
        warn!(error = %e, "failed to flush stdout before spawn");
    }
}

/// Spawn `cmd`, block until it is reaped, classify how it ended.
///
/// A spawn failure (including a failed image load) is an outcome, not an
/// error: no child exists, so there is nothing to wait for. Only a failed
/// wait is returned as `Err`.
pub(crate) fn spawn_and_wait(
    label: &str,
    cmd: &mut Command,
    flush: bool,
) -> Result<TerminationOutcome> {
    if flush {
        flush_stdout();
    }

    debug!(command = %label, "spawning child process");
    let start = Instant::now();

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            error!(command = %label, error = %e, "failed to spawn child process");
            return Ok(TerminationOutcome::SpawnFailure);
        }
    };

    let pid = child.id();
    let status = child.wait().map_err(|e| {
        error!(command = %label, pid, error = %e, "failed to wait for child process");
        ExecutorError::WaitFailed(label.to_string(), e)
    })?;

    let outcome = TerminationOutcome::from_status(status);

    info!(
        command = %label,
        pid,
        duration_ms = start.elapsed().as_millis() as u64,
        exit_code = outcome.exit_code(),
        success = outcome.success(),
        "child process exited"
    );

    Ok(outcome)
}
