//! Stage 3: match a decoded document against its kind's schema. The first
//! (and only) schema tried is the one implied by the classified kind — no
//! trial-and-error across schemas.

use rust_decimal::Decimal;
use serde_json::Value;

use super::model::{MessageKind, ValidatedEvent};

fn str_field<'a>(doc: &'a Value, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

fn opt_str_field(doc: &Value, field: &str) -> Option<String> {
    doc.get(field).and_then(Value::as_str).map(str::to_string)
}

fn int_field(doc: &Value, field: &str) -> Option<i64> {
    doc.get(field).and_then(Value::as_i64)
}

/// Parses a monetary field and normalizes it to exactly two decimal places.
///
/// `serde_json` numbers carry no record of source formatting (`3.00` and `3`
/// parse to the same `f64`), so `rust_decimal`'s float-based deserialization
/// can hand back a `Decimal` at whatever scale the nearest float happens to
/// round-trip at. `round_dp(2)` makes the two-decimal-place invariant a
/// property of this function rather than of however the sender formatted it.
fn decimal_field(doc: &Value, field: &str) -> Option<Decimal> {
    let value: Decimal = serde_json::from_value(doc.get(field)?.clone()).ok()?;
    Some(value.round_dp(2))
}

/// Returns `None` if the document is missing a required field or a field
/// has the wrong shape for the classified kind.
pub fn validate(kind: &MessageKind, doc: &Value) -> Option<ValidatedEvent> {
    match kind {
        MessageKind::AgentInit | MessageKind::AgentCreated => Some(ValidatedEvent::AgentInit {
            agent_id: str_field(doc, "agent_id")?.to_string(),
            agent_name: str_field(doc, "agent_name")?.to_string(),
            platform: str_field(doc, "platform")?.to_string(),
            version: opt_str_field(doc, "version"),
            operating_account: opt_str_field(doc, "operating_account"),
            timestamp: int_field(doc, "timestamp")?,
            metadata: doc.get("metadata").cloned(),
        }),
        MessageKind::Action => Some(ValidatedEvent::Action {
            agent_id: str_field(doc, "agent_id")?.to_string(),
            session_key: str_field(doc, "session_key")?.to_string(),
            action: doc.get("action")?.clone(),
            timestamp: int_field(doc, "timestamp")?,
            reasoning: opt_str_field(doc, "reasoning"),
            previous_hash: opt_str_field(doc, "previous_hash"),
        }),
        MessageKind::Transaction => Some(ValidatedEvent::Transaction {
            agent_id: str_field(doc, "agent_id")?.to_string(),
            transaction_type: str_field(doc, "transaction_type")?.to_string(),
            transaction_id: str_field(doc, "transaction_id")?.to_string(),
            details: str_field(doc, "details")?.to_string(),
            timestamp: int_field(doc, "timestamp")?,
            reasoning: opt_str_field(doc, "reasoning"),
            previous_hash: opt_str_field(doc, "previous_hash"),
        }),
        MessageKind::RentalInitiated => Some(ValidatedEvent::RentalInitiated {
            agent_id: str_field(doc, "agent_id")?.to_string(),
            rental_id: str_field(doc, "rental_id")?.to_string(),
            renter: str_field(doc, "renter")?.to_string(),
            escrow_account: str_field(doc, "escrow_account")?.to_string(),
            stake_usd: decimal_field(doc, "stake_usd")?,
            buffer_usd: decimal_field(doc, "buffer_usd")?,
            timestamp: int_field(doc, "timestamp")?,
        }),
        MessageKind::RentalCompleted => Some(ValidatedEvent::RentalCompleted {
            rental_id: str_field(doc, "rental_id")?.to_string(),
            total_cost_usd: decimal_field(doc, "total_cost_usd")?,
            settlement: doc.get("settlement")?.clone(),
            timestamp: int_field(doc, "timestamp")?,
        }),
        MessageKind::Comms => Some(ValidatedEvent::Comms {
            from: str_field(doc, "from")?.to_string(),
            to: opt_str_field(doc, "to"),
            text: str_field(doc, "text")?.to_string(),
            timestamp: str_field(doc, "timestamp")?.to_string(),
            metadata: doc.get("metadata").cloned(),
        }),
        MessageKind::Unknown | MessageKind::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validates_complete_action_event() {
        let doc = json!({
            "type": "ACTION",
            "agent_id": "agent-1",
            "session_key": "sess-1",
            "action": {"tool": "search", "parameters": {}, "result": "ok"},
            "timestamp": 1_700_000_000,
        });
        let validated = validate(&MessageKind::Action, &doc);
        assert!(matches!(validated, Some(ValidatedEvent::Action { .. })));
    }

    #[test]
    fn rejects_action_missing_session_key() {
        let doc = json!({"type": "ACTION", "agent_id": "agent-1", "timestamp": 1});
        assert!(validate(&MessageKind::Action, &doc).is_none());
    }

    #[test]
    fn parses_rental_initiated_money_fields_as_decimal() {
        let doc = json!({
            "type": "RENTAL_INITIATED",
            "agent_id": "agent-1",
            "rental_id": "rental-1",
            "renter": "renter-1",
            "escrow_account": "escrow-1",
            "stake_usd": 12.50,
            "buffer_usd": 3.00,
            "timestamp": 1_700_000_000,
        });
        let validated = validate(&MessageKind::RentalInitiated, &doc).unwrap();
        match validated {
            ValidatedEvent::RentalInitiated {
                stake_usd,
                buffer_usd,
                ..
            } => {
                assert_eq!(stake_usd.to_string(), "12.50");
                assert_eq!(buffer_usd.to_string(), "3.00");
            }
            _ => panic!("expected RentalInitiated"),
        }
    }

    #[test]
    fn unknown_and_other_kinds_never_validate() {
        let doc = json!({"anything": "goes"});
        assert!(validate(&MessageKind::Unknown, &doc).is_none());
        assert!(validate(&MessageKind::Other("X".to_string()), &doc).is_none());
    }

    #[test]
    fn validates_comms_event() {
        let doc = json!({
            "from": "agent-a",
            "to": "agent-b",
            "text": "hello",
            "timestamp": "2024-01-15T10:30:00Z",
        });
        let validated = validate(&MessageKind::Comms, &doc);
        assert!(matches!(validated, Some(ValidatedEvent::Comms { .. })));
    }
}
