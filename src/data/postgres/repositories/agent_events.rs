//! Agent event repository: append-only audit log for ACTION/TRANSACTION
//! kinds.

use serde_json::Value;
use sqlx::PgExecutor;

use crate::data::postgres::PostgresError;

#[allow(clippy::too_many_arguments)]
pub async fn insert_event<'e, E>(
    executor: E,
    agent_id: &str,
    event_type: &str,
    session_key: Option<&str>,
    transaction_id: Option<&str>,
    transaction_type: Option<&str>,
    action: Option<&Value>,
    reasoning: Option<&str>,
    details: Option<&str>,
    previous_hash: Option<&str>,
    timestamp: i64,
    consensus_timestamp: &str,
    raw_data: &Value,
) -> Result<(), PostgresError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO agent_events
            (agent_id, event_type, session_key, transaction_id, transaction_type,
             action, reasoning, details, previous_hash, timestamp, consensus_timestamp,
             raw_data, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, now())",
    )
    .bind(agent_id)
    .bind(event_type)
    .bind(session_key)
    .bind(transaction_id)
    .bind(transaction_type)
    .bind(action)
    .bind(reasoning)
    .bind(details)
    .bind(previous_hash)
    .bind(timestamp)
    .bind(consensus_timestamp)
    .bind(raw_data)
    .execute(executor)
    .await?;

    Ok(())
}
