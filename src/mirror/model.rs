//! Wire shapes for the mirror REST API's historical message response.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MirrorMessage {
    pub consensus_timestamp: String,
    pub topic_id: String,
    /// Base64-encoded payload, preserved verbatim as received.
    pub message: String,
    pub payer_account_id: Option<String>,
    pub sequence_number: i64,
    pub running_hash: Option<String>,
    pub running_hash_version: Option<i32>,
    pub chunk_info: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MirrorLinks {
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MirrorMessagesResponse {
    pub messages: Vec<MirrorMessage>,
    #[serde(default)]
    pub links: MirrorLinks,
}
