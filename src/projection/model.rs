//! The substrate-level envelope the Projection Writer needs around a
//! parsed payload — everything the Topic Supervisor already knows about
//! where a message came from.

use crate::utils::time::ConsensusTimestamp;

#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub topic_id: String,
    pub consensus_timestamp: ConsensusTimestamp,
    pub sequence_number: i64,
    pub payer_account_id: Option<String>,
    /// The wire form to persist verbatim in `raw_payload`/`message_base64`.
    /// Stored independently of `payload_bytes` so a payload that never was
    /// valid base64 is still preserved exactly as received.
    pub raw_base64: String,
    /// The decoded bytes to run through the parser. Empty when the wire
    /// form failed to decode as base64 — the parser then reports decode
    /// failure on its own, which is the same observable outcome.
    pub payload_bytes: Vec<u8>,
}
