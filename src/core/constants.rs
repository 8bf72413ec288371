//! Process-wide constants: environment variable names, defaults, timeouts.

// =============================================================================
// Application identity
// =============================================================================

pub const APP_NAME: &str = "substrate-indexer";

// =============================================================================
// Environment variables
// =============================================================================

pub const ENV_DATABASE_URL: &str = "INDEXER_DATABASE_URL";
pub const ENV_MIRROR_REST_URL: &str = "INDEXER_MIRROR_REST_URL";
pub const ENV_MIRROR_GRPC_URL: &str = "INDEXER_MIRROR_GRPC_URL";
pub const ENV_TOPICS: &str = "INDEXER_TOPICS";
pub const ENV_POLL_INTERVAL_MS: &str = "INDEXER_POLL_INTERVAL_MS";
pub const ENV_PAGE_DELAY_MS: &str = "INDEXER_PAGE_DELAY_MS";
pub const ENV_LOG: &str = "INDEXER_LOG";

// =============================================================================
// Configuration defaults
// =============================================================================

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;
pub const MIN_POLL_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 100;
pub const DEFAULT_LOG_FILTER: &str = "info,indexer=debug";

// =============================================================================
// Mirror REST client
// =============================================================================

pub const MIRROR_REST_TIMEOUT_SECS: u64 = 30;
pub const MIRROR_REST_PAGE_LIMIT: u32 = 100;

// =============================================================================
// Backoff (Topic Supervisor reconnect)
// =============================================================================

pub const BACKOFF_BASE_MS: u64 = 1_000;
pub const BACKOFF_MAX_MS: u64 = 60_000;

// =============================================================================
// Shutdown
// =============================================================================

pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// PostgreSQL
// =============================================================================

pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;
pub const POSTGRES_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;
