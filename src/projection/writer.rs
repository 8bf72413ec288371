//! Projection Writer: one message in, one atomic transaction out — the
//! substrate record, its projection (if any), and the advanced cursor all
//! commit together or not at all.

use crate::data::postgres::repositories::{cursor, substrate};
use crate::data::postgres::PgPool;
use crate::parser::ParsedMessage;

use super::dispatch::dispatch;
use super::error::ProjectionError;
use super::model::ReceivedMessage;

/// Returns `true` if this was a new substrate record (useful for duplicate-
/// delivery metrics); `false` if (topic_id, sequence_number) was already
/// present, in which case the projection and cursor advance are skipped —
/// they were already applied the first time this message was seen.
pub async fn write(
    pool: &PgPool,
    message: &ReceivedMessage,
    parsed: &ParsedMessage,
) -> Result<bool, ProjectionError> {
    let mut tx = pool.begin().await.map_err(ProjectionError::Transaction)?;

    let consensus_timestamp = message.consensus_timestamp.to_string();

    let inserted = substrate::insert_message(
        &mut *tx,
        &message.topic_id,
        &consensus_timestamp,
        message.sequence_number,
        message.payer_account_id.as_deref(),
        &message.raw_base64,
        parsed.decoded.as_ref(),
        parsed.kind.as_label(),
    )
    .await?;

    // A duplicate delivery (already inserted in an earlier pass) must not
    // re-apply its projector, but the cursor upsert is idempotent and still
    // runs — unknown and unvalidated-but-classified messages advance the
    // cursor too, per the same rule.
    if inserted {
        if let Some(event) = &parsed.validated {
            dispatch(&mut tx, &message.topic_id, &consensus_timestamp, event).await?;
        }
    }

    cursor::upsert_cursor(
        &mut *tx,
        &message.topic_id,
        &consensus_timestamp,
        message.sequence_number,
    )
    .await?;

    tx.commit().await.map_err(ProjectionError::Transaction)?;

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use crate::parser::MessageKind;

    #[test]
    fn unknown_kind_has_no_label() {
        assert_eq!(MessageKind::Unknown.as_label(), None);
    }
}
