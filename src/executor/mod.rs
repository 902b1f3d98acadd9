// Executor module - spawns child processes and classifies how they end
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod config;
pub mod direct;
pub mod error;
pub mod redirect;
pub mod runner;
pub mod shell;
mod spawn;
pub mod types;

pub use config::ExecutorConfig;
pub use direct::DirectExecutor;
pub use error::{ConfigError, ExecutorError, Result};
pub use redirect::RedirectingExecutor;
pub use runner::{ExecutionReport, Executor, Request};
pub use shell::ShellExecutor;
pub use types::{CommandSpec, TerminationOutcome};
