//! Command-line surface for the indexer process.

use clap::Parser;

use super::constants::{
    ENV_DATABASE_URL, ENV_MIRROR_GRPC_URL, ENV_MIRROR_REST_URL, ENV_PAGE_DELAY_MS,
    ENV_POLL_INTERVAL_MS, ENV_TOPICS,
};

#[derive(Parser)]
#[command(name = "substrate-indexer")]
#[command(version, about = "Consensus-substrate topic indexer", long_about = None)]
pub struct Cli {
    /// PostgreSQL connection URL
    #[arg(long, env = ENV_DATABASE_URL)]
    pub database_url: String,

    /// Mirror REST base URL (historical backfill)
    #[arg(long, env = ENV_MIRROR_REST_URL)]
    pub mirror_rest_url: String,

    /// Mirror gRPC endpoint (live subscription)
    #[arg(long, env = ENV_MIRROR_GRPC_URL)]
    pub mirror_grpc_url: String,

    /// Seed topic id to ingest on startup (repeatable)
    #[arg(long = "topic", env = ENV_TOPICS, value_delimiter = ',')]
    pub topics: Vec<String>,

    /// Backfill poll interval in milliseconds (minimum 1000)
    #[arg(long, env = ENV_POLL_INTERVAL_MS)]
    pub poll_interval_ms: Option<u64>,

    /// Delay between backfill pages in milliseconds
    #[arg(long, env = ENV_PAGE_DELAY_MS)]
    pub page_delay_ms: Option<u64>,
}

/// Configuration derived from CLI arguments, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub database_url: String,
    pub mirror_rest_url: String,
    pub mirror_grpc_url: String,
    pub topics: Vec<String>,
    pub poll_interval_ms: Option<u64>,
    pub page_delay_ms: Option<u64>,
}

/// Parse CLI arguments (layered over environment variables by clap's `env` attribute).
pub fn parse() -> CliConfig {
    let cli = Cli::parse();
    CliConfig {
        database_url: cli.database_url,
        mirror_rest_url: cli.mirror_rest_url,
        mirror_grpc_url: cli.mirror_grpc_url,
        topics: cli.topics,
        poll_interval_ms: cli.poll_interval_ms,
        page_delay_ms: cli.page_delay_ms,
    }
}
