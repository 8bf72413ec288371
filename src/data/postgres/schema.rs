//! PostgreSQL schema definitions for the indexer's persisted state.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at BIGINT NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at BIGINT NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success BOOLEAN NOT NULL DEFAULT TRUE
);

-- =============================================================================
-- 1. Sync cursors: one row per topic, the single source of truth for
--    ingestion progress.
-- =============================================================================
CREATE TABLE IF NOT EXISTS sync_cursors (
    topic_id TEXT PRIMARY KEY,
    last_timestamp TEXT NOT NULL,
    last_sequence_number BIGINT NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

-- =============================================================================
-- 2. Substrate records: the raw audit trail, one row per received message.
-- =============================================================================
CREATE TABLE IF NOT EXISTS hcs_messages (
    id BIGSERIAL PRIMARY KEY,
    topic_id TEXT NOT NULL,
    consensus_timestamp TEXT NOT NULL,
    sequence_number BIGINT NOT NULL,
    payer_account_id TEXT,
    message_base64 TEXT NOT NULL,
    decoded_json JSONB,
    message_type TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    UNIQUE (topic_id, sequence_number)
);

CREATE INDEX IF NOT EXISTS idx_hcs_messages_topic_consensus
    ON hcs_messages(topic_id, consensus_timestamp);

-- =============================================================================
-- 3. Agents: upserted projection, keyed by agent_id.
-- =============================================================================
CREATE TABLE IF NOT EXISTS agents (
    agent_id TEXT PRIMARY KEY,
    agent_name TEXT NOT NULL,
    platform TEXT NOT NULL,
    version TEXT,
    operating_account TEXT,
    first_seen_at TIMESTAMPTZ NOT NULL,
    last_seen_at TIMESTAMPTZ NOT NULL,
    metadata JSONB
);

-- =============================================================================
-- 4. Agent events: append-only audit log for ACTION / TRANSACTION kinds.
-- =============================================================================
CREATE TABLE IF NOT EXISTS agent_events (
    id BIGSERIAL PRIMARY KEY,
    agent_id TEXT NOT NULL,
    event_type TEXT NOT NULL,
    session_key TEXT,
    transaction_id TEXT,
    transaction_type TEXT,
    action JSONB,
    reasoning TEXT,
    details TEXT,
    previous_hash TEXT,
    timestamp BIGINT NOT NULL,
    consensus_timestamp TEXT NOT NULL,
    raw_data JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_agent_events_agent ON agent_events(agent_id, timestamp);

-- =============================================================================
-- 5. Rentals: two-state lifecycle, initiated -> completed, keyed by rental_id.
-- =============================================================================
CREATE TABLE IF NOT EXISTS rentals (
    rental_id TEXT PRIMARY KEY,
    agent_id TEXT NOT NULL,
    renter TEXT,
    escrow_account TEXT,
    stake_usd NUMERIC(10, 2),
    buffer_usd NUMERIC(10, 2),
    total_cost_usd NUMERIC(10, 2),
    settlement JSONB,
    status TEXT NOT NULL DEFAULT 'initiated' CHECK (status IN ('initiated', 'completed')),
    initiated_at BIGINT,
    completed_at BIGINT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_rentals_agent ON rentals(agent_id);

-- =============================================================================
-- 6. Agent comms: append-only audit log for COMMS kind.
-- =============================================================================
CREATE TABLE IF NOT EXISTS agent_comms (
    id BIGSERIAL PRIMARY KEY,
    topic_id TEXT NOT NULL,
    from_agent TEXT NOT NULL,
    to_agent TEXT,
    text TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    consensus_timestamp TEXT NOT NULL,
    metadata JSONB,
    created_at TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_agent_comms_from ON agent_comms(from_agent);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn schema_version_is_positive() {
        assert!(SCHEMA_VERSION > 0);
    }

    #[test]
    fn schema_contains_required_tables() {
        let required_tables = [
            "schema_version",
            "schema_migrations",
            "sync_cursors",
            "hcs_messages",
            "agents",
            "agent_events",
            "rentals",
            "agent_comms",
        ];

        for table in required_tables {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "schema missing table: {}",
                table
            );
        }
    }

    #[test]
    fn schema_enforces_substrate_record_uniqueness() {
        assert!(SCHEMA.contains("UNIQUE (topic_id, sequence_number)"));
    }
}
