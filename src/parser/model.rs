//! Types produced by the parser pipeline: the classification tag, the
//! validated per-kind event shapes, and the combined result of running a
//! payload through decode → classify → validate.

use rust_decimal::Decimal;
use serde_json::Value;

/// The closed set of recognized kinds, plus passthrough of whatever literal
/// `type` string a document carries when it doesn't match a known kind.
/// Unrecognized kinds are preserved verbatim rather than collapsed to a
/// single `Unknown` bucket, so a consumer querying by `message_kind` can
/// still find them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    AgentInit,
    AgentCreated,
    Action,
    Transaction,
    RentalInitiated,
    RentalCompleted,
    Comms,
    /// The document had no recognizable discriminator at all.
    Unknown,
    /// The document carried a `type` field whose value isn't one of the
    /// known kinds above.
    Other(String),
}

impl MessageKind {
    /// The string stored in `message_kind`; `None` for `Unknown`, matching
    /// the substrate record's "else absent" rule.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            MessageKind::AgentInit => Some("AGENT_INIT"),
            MessageKind::AgentCreated => Some("AGENT_CREATED"),
            MessageKind::Action => Some("ACTION"),
            MessageKind::Transaction => Some("TRANSACTION"),
            MessageKind::RentalInitiated => Some("RENTAL_INITIATED"),
            MessageKind::RentalCompleted => Some("RENTAL_COMPLETED"),
            MessageKind::Comms => Some("COMMS"),
            MessageKind::Other(label) => Some(label.as_str()),
            MessageKind::Unknown => None,
        }
    }
}

/// A document that matched one of the known schemas, with its fields typed
/// and ready for projection. Money fields are `Decimal` so two-decimal-place
/// round-tripping is exact.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedEvent {
    AgentInit {
        agent_id: String,
        agent_name: String,
        platform: String,
        version: Option<String>,
        operating_account: Option<String>,
        timestamp: i64,
        metadata: Option<Value>,
    },
    Action {
        agent_id: String,
        session_key: String,
        action: Value,
        timestamp: i64,
        reasoning: Option<String>,
        previous_hash: Option<String>,
    },
    Transaction {
        agent_id: String,
        transaction_type: String,
        transaction_id: String,
        details: String,
        timestamp: i64,
        reasoning: Option<String>,
        previous_hash: Option<String>,
    },
    RentalInitiated {
        agent_id: String,
        rental_id: String,
        renter: String,
        escrow_account: String,
        stake_usd: Decimal,
        buffer_usd: Decimal,
        timestamp: i64,
    },
    RentalCompleted {
        rental_id: String,
        total_cost_usd: Decimal,
        settlement: Value,
        timestamp: i64,
    },
    Comms {
        from: String,
        to: Option<String>,
        text: String,
        timestamp: String,
        metadata: Option<Value>,
    },
}

/// The outcome of running one payload through the full pipeline. Every
/// stage can independently come up empty without the others failing.
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    pub kind: MessageKind,
    pub decoded: Option<Value>,
    pub validated: Option<ValidatedEvent>,
}
