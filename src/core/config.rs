//! Application configuration, layered CLI > environment > defaults.
//!
//! `clap`'s `env` attribute already folds environment variables into the CLI
//! layer (see `cli.rs`); this module's job is just applying defaults and the
//! few validation rules (`poll_interval_ms` has a floor) that turn a
//! [`CliConfig`] into a fully-resolved [`AppConfig`].

use thiserror::Error;

use super::cli::CliConfig;
use super::constants::{
    DEFAULT_LOG_FILTER, DEFAULT_PAGE_DELAY_MS, DEFAULT_POLL_INTERVAL_MS, ENV_LOG,
    MIN_POLL_INTERVAL_MS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub mirror_rest_url: String,
    pub mirror_grpc_url: String,
    pub topics: Vec<String>,
    pub poll_interval_ms: u64,
    pub page_delay_ms: u64,
    pub log: String,
}

impl AppConfig {
    /// Resolve a complete configuration from CLI/env input, applying defaults.
    pub fn load(cli: &CliConfig) -> Result<Self, ConfigError> {
        if cli.database_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database_url",
            });
        }
        if cli.mirror_rest_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "mirror_rest_url",
            });
        }
        if cli.mirror_grpc_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "mirror_grpc_url",
            });
        }

        let poll_interval_ms = cli
            .poll_interval_ms
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
            .max(MIN_POLL_INTERVAL_MS);

        let page_delay_ms = cli.page_delay_ms.unwrap_or(DEFAULT_PAGE_DELAY_MS);

        let log = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            database_url: cli.database_url.clone(),
            mirror_rest_url: cli.mirror_rest_url.clone(),
            mirror_grpc_url: cli.mirror_grpc_url.clone(),
            topics: cli.topics.clone(),
            poll_interval_ms,
            page_delay_ms,
            log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> CliConfig {
        CliConfig {
            database_url: "postgres://localhost/indexer".to_string(),
            mirror_rest_url: "https://mirror.example/api".to_string(),
            mirror_grpc_url: "https://mirror.example:443".to_string(),
            topics: vec!["0.0.1001".to_string()],
            poll_interval_ms: None,
            page_delay_ms: None,
        }
    }

    #[test]
    fn applies_defaults() {
        let config = AppConfig::load(&base_cli()).unwrap();
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.page_delay_ms, DEFAULT_PAGE_DELAY_MS);
    }

    #[test]
    fn clamps_poll_interval_to_minimum() {
        let mut cli = base_cli();
        cli.poll_interval_ms = Some(10);
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.poll_interval_ms, MIN_POLL_INTERVAL_MS);
    }

    #[test]
    fn rejects_missing_database_url() {
        let mut cli = base_cli();
        cli.database_url = String::new();
        assert!(matches!(
            AppConfig::load(&cli),
            Err(ConfigError::MissingField { field: "database_url" })
        ));
    }
}
