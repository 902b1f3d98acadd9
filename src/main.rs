//! sysrun
//!
//! Runs one command through a shell, directly, or directly with stdout sent to
//! a file, and exits 0 only if the child exited normally with status 0.

mod executor;

use clap::{Parser, Subcommand, ValueEnum};
use executor::{CommandSpec, Executor, ExecutorConfig, Request};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{error, info, Level};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "sysrun", version)]
#[command(about = "Run a command and report how it ended")]
struct Args {
    /// Config file (default: ~/.sysrun/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level; overrides SYSRUN_LOG and the config file
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Run a command line with `<shell> -c`
    Shell {
        /// Full command line, passed verbatim
        command_line: String,
    },

    /// Run an absolute program path directly
    Exec {
        /// Program path followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        argv: Vec<String>,
    },

    /// Run an absolute program path with stdout written to a file
    Redirect {
        /// File receiving the child's stdout (created or truncated)
        #[arg(short, long)]
        output: PathBuf,

        /// Program path followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        argv: Vec<String>,
    },
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(ExecutorConfig::default_path);
    let config = match ExecutorConfig::from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sysrun error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(args.log_level, &config.log_level);

    // Env overrides are applied after logging so invalid values get reported.
    let config = config.with_env();
    info!(config = %config_path.display(), shell = %config.shell.display(), "configuration loaded");

    let request = match build_request(args.command) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "invalid command");
            return ExitCode::FAILURE;
        }
    };

    let executor = Executor::new(&config);
    let report = executor.execute(&request);

    if args.json {
        match serde_json::to_string(&report) {
            Ok(line) => println!("{line}"),
            Err(e) => error!(error = %e, "failed to serialize report"),
        }
    }

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn build_request(cmd: Cmd) -> executor::Result<Request> {
    Ok(match cmd {
        Cmd::Shell { command_line } => Request::Shell {
            command: command_line,
        },
        Cmd::Exec { argv } => Request::Direct {
            command: CommandSpec::new(argv)?,
        },
        Cmd::Redirect { output, argv } => Request::Redirect {
            output,
            command: CommandSpec::new(argv)?,
        },
    })
}

/// Priority: `--log-level`, then `SYSRUN_LOG`, then the config file, then `info`.
/// Logs go to stderr so stdout stays free for the child and `--json`.
fn init_logging(cli_level: Option<LogLevel>, config_level: &str) {
    let level = cli_level.map(Level::from).unwrap_or_else(|| {
        std::env::var("SYSRUN_LOG")
            .ok()
            .and_then(|s| Level::from_str(s.trim()).ok())
            .or_else(|| Level::from_str(config_level.trim()).ok())
            .unwrap_or(Level::INFO)
    });

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
