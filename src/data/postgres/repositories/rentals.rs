//! Rental repository: two-state lifecycle, initiated -> completed, keyed
//! by rental_id.

use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgExecutor;

use crate::data::postgres::PostgresError;

#[allow(clippy::too_many_arguments)]
pub async fn insert_initiated<'e, E>(
    executor: E,
    rental_id: &str,
    agent_id: &str,
    renter: Option<&str>,
    escrow_account: Option<&str>,
    stake_usd: Decimal,
    buffer_usd: Decimal,
    initiated_at: i64,
) -> Result<(), PostgresError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO rentals
            (rental_id, agent_id, renter, escrow_account, stake_usd, buffer_usd,
             status, initiated_at, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, 'initiated', $7, now(), now())
         ON CONFLICT (rental_id) DO NOTHING",
    )
    .bind(rental_id)
    .bind(agent_id)
    .bind(renter)
    .bind(escrow_account)
    .bind(stake_usd)
    .bind(buffer_usd)
    .bind(initiated_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Complete a rental. A no-op (no error) if `rental_id` has no matching row
/// yet — the initiation event may arrive later in a different backfill
/// window; the cursor still advances regardless.
pub async fn complete<'e, E>(
    executor: E,
    rental_id: &str,
    total_cost_usd: Decimal,
    settlement: &Value,
    completed_at: i64,
) -> Result<(), PostgresError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "UPDATE rentals SET
            status = 'completed',
            total_cost_usd = $2,
            settlement = $3,
            completed_at = $4,
            updated_at = now()
         WHERE rental_id = $1",
    )
    .bind(rental_id)
    .bind(total_cost_usd)
    .bind(settlement)
    .bind(completed_at)
    .execute(executor)
    .await?;

    Ok(())
}
