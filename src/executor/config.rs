// Executor configuration

use crate::executor::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Executor configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Shell used by `ShellExecutor` (invoked as `<shell> -c <command>`)
    pub shell: PathBuf,
    /// Permission bits for files created by `RedirectingExecutor`
    pub output_mode: u32,
    /// Flush the parent's stdout before spawning
    pub flush_stdout: bool,
    /// Default log level for the binaries
    pub log_level: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/sh"),
            output_mode: 0o644,
            flush_stdout: true,
            log_level: "info".to_string(),
        }
    }
}

impl ExecutorConfig {
    /// Default config file location: `~/.sysrun/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(".sysrun").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".sysrun/config.toml"))
    }

    /// Load from a TOML file; a missing file yields defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ExecutorConfig = toml::from_str(&content)?;

        debug!(path = %path.display(), shell = %config.shell.display(), "loaded executor config");
        Ok(config)
    }

    /// Apply `SYSRUN_*` environment overrides (reads `.env` first)
    pub fn with_env(mut self) -> Self {
        dotenvy::dotenv().ok();

        if let Ok(shell) = std::env::var("SYSRUN_SHELL") {
            if shell.is_empty() {
                warn!(var = "SYSRUN_SHELL", "Empty env var value, using default");
            } else {
                self.shell = PathBuf::from(shell);
            }
        }
        if let Ok(v) = std::env::var("SYSRUN_OUTPUT_MODE") {
            match parse_mode(&v) {
                Some(mode) => self.output_mode = mode,
                None => {
                    warn!(var = "SYSRUN_OUTPUT_MODE", value = %v, "Invalid env var value, using default")
                }
            }
        }
        self.flush_stdout = parse_env_var("SYSRUN_FLUSH_STDOUT", self.flush_stdout);

        self
    }
}

/// Parse an environment variable, logging a warning if the value is present but invalid.
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => match v.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Octal permission bits, with or without a `0o`/`0` prefix
fn parse_mode(s: &str) -> Option<u32> {
    let s = s.trim();
    let digits = s.strip_prefix("0o").unwrap_or(s);
    u32::from_str_radix(digits, 8).ok().filter(|m| *m <= 0o7777)
}
