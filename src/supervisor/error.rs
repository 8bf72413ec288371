//! Errors that move a Topic Supervisor into `reconnecting`.

use thiserror::Error;

use crate::data::postgres::PostgresError;
use crate::mirror::MirrorError;
use crate::projection::ProjectionError;
use crate::stream::SubscriberError;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Database(#[from] PostgresError),

    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error(transparent)]
    Subscriber(#[from] SubscriberError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("mirror returned an unparseable consensus timestamp: {0:?}")]
    MalformedConsensusTimestamp(String),

    #[error("live subscription ended without ever erroring")]
    StreamEnded,
}
