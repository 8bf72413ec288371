//! Errors from the Projection Writer's atomic unit.

use thiserror::Error;

use crate::data::postgres::PostgresError;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Database(#[from] PostgresError),

    #[error("failed to begin projection transaction: {0}")]
    Transaction(#[source] sqlx::Error),
}
