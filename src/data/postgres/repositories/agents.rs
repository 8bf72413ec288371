//! Agent repository: upserted projection keyed by agent_id.

use serde_json::Value;
use sqlx::PgExecutor;

use crate::data::postgres::PostgresError;

/// Upsert an agent from an AGENT_INIT/AGENT_CREATED event. On insert sets
/// first_seen/last_seen to now; on conflict refreshes last_seen and every
/// descriptive field.
pub async fn upsert_agent<'e, E>(
    executor: E,
    agent_id: &str,
    agent_name: &str,
    platform: &str,
    version: Option<&str>,
    operating_account: Option<&str>,
    metadata: Option<&Value>,
) -> Result<(), PostgresError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO agents
            (agent_id, agent_name, platform, version, operating_account,
             first_seen_at, last_seen_at, metadata)
         VALUES ($1, $2, $3, $4, $5, now(), now(), $6)
         ON CONFLICT (agent_id) DO UPDATE SET
            last_seen_at = now(),
            agent_name = EXCLUDED.agent_name,
            platform = EXCLUDED.platform,
            version = EXCLUDED.version,
            operating_account = EXCLUDED.operating_account,
            metadata = EXCLUDED.metadata",
    )
    .bind(agent_id)
    .bind(agent_name)
    .bind(platform)
    .bind(version)
    .bind(operating_account)
    .bind(metadata)
    .execute(executor)
    .await?;

    Ok(())
}

/// Touch an agent's last_seen_at from observed ACTION/TRANSACTION activity.
/// A no-op if the agent does not exist — this projector never creates one.
pub async fn touch_last_seen<'e, E>(executor: E, agent_id: &str) -> Result<(), PostgresError>
where
    E: PgExecutor<'e>,
{
    sqlx::query("UPDATE agents SET last_seen_at = now() WHERE agent_id = $1")
        .bind(agent_id)
        .execute(executor)
        .await?;

    Ok(())
}
