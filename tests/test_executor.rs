// Integration tests for Executor module
// This file should be run with cargo test --test test_executor

#[path = "../src/executor/mod.rs"]
mod executor;

use executor::{
    CommandSpec, DirectExecutor, Executor, ExecutorConfig, RedirectingExecutor, Request,
    ShellExecutor, TerminationOutcome,
};

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .init();
    });
}

/// Collect formatted events from `f` into a string
fn capture_logs<F: FnOnce()>(f: F) -> String {
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn spec(argv: &[&str]) -> CommandSpec {
    CommandSpec::new(argv.iter().copied()).expect("non-empty command")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shell success and failure
    #[test]
    fn test_shell_exit_status() {
        init_tracing();

        let shell = ShellExecutor::default();
        assert!(shell.run("true"), "true should succeed");
        assert!(shell.run("echo line1 && echo line2"), "compound line should succeed");
        assert!(!shell.run("false"), "false should fail");
        assert!(!shell.run("exit 3"), "exit 3 should fail");
    }

    /// Empty command never reaches a shell
    #[test]
    fn test_shell_empty_command() {
        init_tracing();

        let shell = ShellExecutor::default();
        assert!(!shell.run(""));
        assert!(shell.outcome("").is_err());
    }

    /// Shell reports the exact nonzero code
    #[test]
    fn test_shell_reported_code() {
        init_tracing();

        let shell = ShellExecutor::default();
        assert_eq!(
            shell.outcome("exit 3").unwrap(),
            TerminationOutcome::NormalExit { code: 3 }
        );

        let mut result = true;
        let logs = capture_logs(|| result = shell.run("exit 3"));
        assert!(!result);
        assert!(logs.contains("WARN"), "logs: {}", logs);
        assert!(logs.contains("shell command failed"), "logs: {}", logs);
        assert!(logs.contains("exit_code=3"), "logs: {}", logs);
    }

    /// Successful shell commands emit no failure report
    #[test]
    fn test_shell_success_not_reported() {
        init_tracing();

        let shell = ShellExecutor::default();
        let logs = capture_logs(|| assert!(shell.run("exit 0")));
        assert!(!logs.contains("WARN"), "logs: {}", logs);
        assert!(logs.contains("child process exited"), "logs: {}", logs);
    }

    /// Direct exec of /bin/true and /bin/false
    #[test]
    fn test_direct_true_false() {
        init_tracing();

        let direct = DirectExecutor::default();
        assert!(direct.run(&spec(&["/bin/true"])));
        assert!(!direct.run(&spec(&["/bin/false"])));
    }

    /// Negative counts never spawn
    #[test]
    fn test_direct_negative_count() {
        init_tracing();

        let direct = DirectExecutor::default();
        for count in [-1isize, -2, isize::MIN] {
            assert!(!direct.run_counted(count, &["/bin/true"]));
        }
    }

    /// Missing program fails instead of hanging
    #[test]
    fn test_direct_missing_program() {
        init_tracing();

        let direct = DirectExecutor::default();
        assert!(!direct.run(&spec(&["/does/not/exist"])));
    }

    /// The direct path does no shell interpretation
    #[test]
    fn test_direct_no_shell_expansion() {
        init_tracing();

        // $1 arrives unexpanded
        let direct = DirectExecutor::default();
        assert!(direct.run(&spec(&[
            "/bin/sh",
            "-c",
            "test \"$1\" = '$HOME * a;b'",
            "/bin/sh",
            "$HOME * a;b",
        ])));
        // `;` is not a separator: echo just prints `exit 1`
        assert!(direct.run(&spec(&["/bin/echo", "hi;", "exit", "1"])));
    }

    /// Redirected output shows arguments unexpanded
    #[test]
    fn test_redirect_no_shell_expansion() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("echo.txt");

        let redirect = RedirectingExecutor::default();
        assert!(redirect.run(&out, &spec(&["/bin/echo", "$HOME", "*", "a;b"])));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "$HOME * a;b\n");
    }

    /// A child killed by a signal is a failure, not a hang
    #[cfg(unix)]
    #[test]
    fn test_direct_signaled_child() {
        init_tracing();

        let direct = DirectExecutor::default();
        let command = spec(&["/bin/sh", "-c", "kill -TERM $$"]);

        assert!(matches!(
            direct.outcome(&command).unwrap(),
            TerminationOutcome::Signaled { signal: 15, .. }
        ));
        assert!(!direct.run(&command));
    }

    /// Redirected stdout lands in the file
    #[test]
    fn test_redirect_writes_file() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");

        let redirect = RedirectingExecutor::default();
        assert!(redirect.run(&out, &spec(&["/bin/echo", "hello"])));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "hello\n");
    }

    /// Redirecting twice overwrites
    #[test]
    fn test_redirect_truncates() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");

        let redirect = RedirectingExecutor::default();
        assert!(redirect.run(&out, &spec(&["/bin/echo", "first run output"])));
        assert!(redirect.run(&out, &spec(&["/bin/echo", "2nd"])));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "2nd\n");
    }

    /// Unwritable target fails without a child
    #[test]
    fn test_redirect_bad_directory() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("out.txt");

        let redirect = RedirectingExecutor::default();
        assert!(!redirect.run(&out, &spec(&["/bin/echo", "hello"])));
        assert!(!out.exists());
    }

    /// A redirected child that fails still returns false
    #[test]
    fn test_redirect_child_failure() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");

        let redirect = RedirectingExecutor::default();
        assert!(!redirect.run(&out, &spec(&["/bin/sh", "-c", "echo partial; exit 4"])));
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "partial\n");
    }

    /// Facade routes each request to the matching executor
    #[test]
    fn test_facade_execute() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("facade.txt");

        let executor = Executor::new(&ExecutorConfig::default());

        let report = executor.execute(&Request::Redirect {
            output: out.clone(),
            command: spec(&["/bin/echo", "facade"]),
        });
        assert!(report.success);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "facade\n");

        let report = executor.execute(&Request::Direct {
            command: spec(&["/nonexistent"]),
        });
        assert!(!report.success);
        assert_eq!(report.outcome, Some(TerminationOutcome::SpawnFailure));

        let report = executor.execute(&Request::Shell {
            command: String::new(),
        });
        assert!(!report.success);
        assert!(report.error.is_some());
    }

    /// Custom shell from config is honoured
    #[test]
    fn test_configured_shell() {
        init_tracing();

        let config = ExecutorConfig {
            shell: "/nonexistent/shell".into(),
            ..Default::default()
        };
        let shell = ShellExecutor::new(&config);
        assert!(!shell.run("true"));
    }
}
