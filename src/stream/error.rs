//! Errors surfaced by the Push Subscriber's live gRPC stream.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubscriberError {
    #[error("failed to connect to mirror gRPC endpoint: {0}")]
    Connect(#[from] tonic::transport::Error),

    #[error("mirror gRPC stream returned an error: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("mirror gRPC stream ended without error")]
    UnexpectedEof,
}
