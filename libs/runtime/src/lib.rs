//! Process-level plumbing shared by the binaries: layered configuration,
//! home directory resolution and logging bootstrap.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{AppConfig, AppSection, CliArgs, LoggingConfig, Section};
