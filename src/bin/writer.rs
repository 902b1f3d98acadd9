//! writer
//!
//! Writes a string verbatim to a file, creating or truncating it.
//! Exits 0 on success and 1 on any failure. Every log record carries the
//! program name and pid.

use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, error, info_span, Level};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "writer")]
#[command(about = "Write a string to a file")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// File to create or truncate
    #[arg(allow_hyphen_values = true)]
    writefile: PathBuf,

    /// String written as-is, with no trailing newline
    #[arg(allow_hyphen_values = true)]
    writestr: OsString,
}

/// Parse exactly two positionals taken verbatim.
///
/// On a wrong count, returns the number of arguments received.
fn parse_args(argv: Vec<OsString>) -> Result<Args, usize> {
    let given = argv.len().saturating_sub(1);
    if given != 2 {
        return Err(given);
    }

    // `--` keeps values like `-out.txt` from being read as flags.
    let mut argv = argv.into_iter();
    let program = argv.next().unwrap_or_else(|| OsString::from("writer"));
    let rest = std::iter::once(OsString::from("--")).chain(argv);
    Args::try_parse_from(std::iter::once(program).chain(rest)).map_err(|_| given)
}

#[derive(Debug, Error)]
enum WriterError {
    #[error("Error opening file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing to file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error closing file {}: {source}", path.display())]
    Close {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn write_string(path: &Path, content: &OsStr) -> Result<(), WriterError> {
    let mut file = File::create(path).map_err(|source| WriterError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(content_bytes(content).as_ref())
        .map_err(|source| WriterError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    // Dropping a File swallows close errors; sync surfaces deferred write failures.
    file.sync_all().map_err(|source| WriterError::Close {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(unix)]
fn content_bytes(content: &OsStr) -> std::borrow::Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    std::borrow::Cow::Borrowed(content.as_bytes())
}

#[cfg(not(unix))]
fn content_bytes(content: &OsStr) -> std::borrow::Cow<'_, [u8]> {
    match content.to_string_lossy() {
        std::borrow::Cow::Borrowed(s) => std::borrow::Cow::Borrowed(s.as_bytes()),
        std::borrow::Cow::Owned(s) => std::borrow::Cow::Owned(s.into_bytes()),
    }
}

fn main() -> ExitCode {
    let level = std::env::var("SYSRUN_LOG")
        .ok()
        .and_then(|s| Level::from_str(s.trim()).ok())
        .unwrap_or(Level::INFO);
    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let span = info_span!("writer", pid = std::process::id());
    let _enter = span.enter();

    let argv: Vec<OsString> = std::env::args_os().collect();
    let program = argv
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "writer".to_string());

    let args = match parse_args(argv) {
        Ok(args) => args,
        Err(given) => {
            error!("Wrong number of arguments: {}", given);
            eprintln!("Usage: {} <writefile> <writestr>", program);
            return ExitCode::FAILURE;
        }
    };

    debug!(
        "Writing {} to {}",
        args.writestr.to_string_lossy(),
        args.writefile.display()
    );

    match write_string(&args.writefile, &args.writestr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
