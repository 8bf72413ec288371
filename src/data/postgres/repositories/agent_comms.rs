//! Agent comms repository: append-only audit log for the COMMS kind.

use serde_json::Value;
use sqlx::PgExecutor;

use crate::data::postgres::PostgresError;

#[allow(clippy::too_many_arguments)]
pub async fn insert_comms<'e, E>(
    executor: E,
    topic_id: &str,
    from_agent: &str,
    to_agent: Option<&str>,
    text: &str,
    timestamp: &str,
    consensus_timestamp: &str,
    metadata: Option<&Value>,
) -> Result<(), PostgresError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO agent_comms
            (topic_id, from_agent, to_agent, text, timestamp, consensus_timestamp,
             metadata, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, now())",
    )
    .bind(topic_id)
    .bind(from_agent)
    .bind(to_agent)
    .bind(text)
    .bind(timestamp)
    .bind(consensus_timestamp)
    .bind(metadata)
    .execute(executor)
    .await?;

    Ok(())
}
