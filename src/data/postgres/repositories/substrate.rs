//! Substrate record repository: the raw audit trail, one row per received
//! message.

use serde_json::Value;
use sqlx::PgExecutor;

use crate::data::postgres::PostgresError;

/// Insert a substrate record. Returns `true` if a new row was written,
/// `false` if (topic_id, sequence_number) already existed (duplicate
/// delivery, e.g. the same message arriving via both backfill and stream).
#[allow(clippy::too_many_arguments)]
pub async fn insert_message<'e, E>(
    executor: E,
    topic_id: &str,
    consensus_timestamp: &str,
    sequence_number: i64,
    payer_account_id: Option<&str>,
    message_base64: &str,
    decoded_json: Option<&Value>,
    message_type: Option<&str>,
) -> Result<bool, PostgresError>
where
    E: PgExecutor<'e>,
{
    let inserted_id: Option<(i64,)> = sqlx::query_as(
        "INSERT INTO hcs_messages
            (topic_id, consensus_timestamp, sequence_number, payer_account_id,
             message_base64, decoded_json, message_type, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, now())
         ON CONFLICT (topic_id, sequence_number) DO NOTHING
         RETURNING id",
    )
    .bind(topic_id)
    .bind(consensus_timestamp)
    .bind(sequence_number)
    .bind(payer_account_id)
    .bind(message_base64)
    .bind(decoded_json)
    .bind(message_type)
    .fetch_optional(executor)
    .await?;

    Ok(inserted_id.is_some())
}
