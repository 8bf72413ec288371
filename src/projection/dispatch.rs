//! Projector dispatch: one validated event becomes one write against its
//! entity table, inside the caller's transaction.

use sqlx::{Postgres, Transaction};

use crate::data::postgres::repositories::{agent_comms, agent_events, agents, rentals};
use crate::data::postgres::PostgresError;
use crate::parser::ValidatedEvent;

pub async fn dispatch(
    tx: &mut Transaction<'_, Postgres>,
    topic_id: &str,
    consensus_timestamp: &str,
    event: &ValidatedEvent,
) -> Result<(), PostgresError> {
    match event {
        ValidatedEvent::AgentInit {
            agent_id,
            agent_name,
            platform,
            version,
            operating_account,
            metadata,
            ..
        } => {
            agents::upsert_agent(
                &mut **tx,
                agent_id,
                agent_name,
                platform,
                version.as_deref(),
                operating_account.as_deref(),
                metadata.as_ref(),
            )
            .await
        }
        ValidatedEvent::Action {
            agent_id,
            session_key,
            action,
            timestamp,
            reasoning,
            previous_hash,
        } => {
            agent_events::insert_event(
                &mut **tx,
                agent_id,
                "ACTION",
                Some(session_key.as_str()),
                None,
                None,
                Some(action),
                reasoning.as_deref(),
                None,
                previous_hash.as_deref(),
                *timestamp,
                consensus_timestamp,
                action,
            )
            .await?;
            agents::touch_last_seen(&mut **tx, agent_id).await
        }
        ValidatedEvent::Transaction {
            agent_id,
            transaction_type,
            transaction_id,
            details,
            timestamp,
            reasoning,
            previous_hash,
        } => {
            agent_events::insert_event(
                &mut **tx,
                agent_id,
                "TRANSACTION",
                None,
                Some(transaction_id.as_str()),
                Some(transaction_type.as_str()),
                None,
                reasoning.as_deref(),
                Some(details.as_str()),
                previous_hash.as_deref(),
                *timestamp,
                consensus_timestamp,
                &serde_json::json!({ "details": details }),
            )
            .await?;
            agents::touch_last_seen(&mut **tx, agent_id).await
        }
        ValidatedEvent::RentalInitiated {
            agent_id,
            rental_id,
            renter,
            escrow_account,
            stake_usd,
            buffer_usd,
            timestamp,
        } => {
            rentals::insert_initiated(
                &mut **tx,
                rental_id,
                agent_id,
                Some(renter.as_str()),
                Some(escrow_account.as_str()),
                *stake_usd,
                *buffer_usd,
                *timestamp,
            )
            .await
        }
        ValidatedEvent::RentalCompleted {
            rental_id,
            total_cost_usd,
            settlement,
            timestamp,
        } => rentals::complete(&mut **tx, rental_id, *total_cost_usd, settlement, *timestamp).await,
        ValidatedEvent::Comms {
            from,
            to,
            text,
            timestamp,
            metadata,
        } => {
            agent_comms::insert_comms(
                &mut **tx,
                topic_id,
                from,
                to.as_deref(),
                text,
                timestamp,
                consensus_timestamp,
                metadata.as_ref(),
            )
            .await
        }
    }
}
