//! Sync cursor repository: the single source of truth for per-topic
//! ingestion progress.

use sqlx::PgExecutor;

use crate::data::postgres::PostgresError;

/// Load the last processed (consensus_timestamp, sequence_number) for a
/// topic, or `None` if the topic has never been ingested.
pub async fn get_cursor<'e, E>(
    executor: E,
    topic_id: &str,
) -> Result<Option<(String, i64)>, PostgresError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, (String, i64)>(
        "SELECT last_timestamp, last_sequence_number FROM sync_cursors WHERE topic_id = $1",
    )
    .bind(topic_id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

/// Advance the cursor to `(last_timestamp, last_sequence_number)`. This is
/// always the last statement of a Projection Writer transaction.
pub async fn upsert_cursor<'e, E>(
    executor: E,
    topic_id: &str,
    last_timestamp: &str,
    last_sequence_number: i64,
) -> Result<(), PostgresError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO sync_cursors (topic_id, last_timestamp, last_sequence_number, updated_at)
         VALUES ($1, $2, $3, now())
         ON CONFLICT (topic_id) DO UPDATE SET
            last_timestamp = EXCLUDED.last_timestamp,
            last_sequence_number = EXCLUDED.last_sequence_number,
            updated_at = EXCLUDED.updated_at",
    )
    .bind(topic_id)
    .bind(last_timestamp)
    .bind(last_sequence_number)
    .execute(executor)
    .await?;

    Ok(())
}
