//! Core application infrastructure: CLI/env configuration and shutdown
//! coordination for the indexer binary.

pub mod cli;
pub mod config;
pub mod constants;
pub mod shutdown;

pub use crate::app::CoreApp;
pub use cli::{Cli, CliConfig};
pub use config::{AppConfig, ConfigError};
pub use shutdown::ShutdownService;
