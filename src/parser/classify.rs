//! Stage 2: classify a decoded document by inspecting discriminator fields.

use serde_json::Value;

use super::model::MessageKind;

/// Rule: a `type` field wins and is preserved verbatim when unrecognized;
/// otherwise a COMMS-shaped document ({from, text, timestamp}) classifies as
/// COMMS; otherwise unknown.
pub fn classify(decoded: &Value) -> MessageKind {
    if let Some(type_value) = decoded.get("type").and_then(Value::as_str) {
        return match type_value {
            "AGENT_INIT" => MessageKind::AgentInit,
            "AGENT_CREATED" => MessageKind::AgentCreated,
            "ACTION" => MessageKind::Action,
            "TRANSACTION" => MessageKind::Transaction,
            "RENTAL_INITIATED" => MessageKind::RentalInitiated,
            "RENTAL_COMPLETED" => MessageKind::RentalCompleted,
            "COMMS" => MessageKind::Comms,
            other => MessageKind::Other(other.to_string()),
        };
    }

    let looks_like_comms = decoded.get("from").is_some()
        && decoded.get("text").is_some()
        && decoded.get("timestamp").is_some();
    if looks_like_comms {
        return MessageKind::Comms;
    }

    MessageKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_known_type_field() {
        assert_eq!(
            classify(&json!({"type": "ACTION"})),
            MessageKind::Action
        );
    }

    #[test]
    fn preserves_unrecognized_type_verbatim() {
        assert_eq!(
            classify(&json!({"type": "CUSTOM_EVENT"})),
            MessageKind::Other("CUSTOM_EVENT".to_string())
        );
    }

    #[test]
    fn classifies_typeless_comms_shape() {
        let doc = json!({"from": "agent-a", "text": "hi", "timestamp": "2024-01-01T00:00:00Z"});
        assert_eq!(classify(&doc), MessageKind::Comms);
    }

    #[test]
    fn classifies_unrecognizable_document_as_unknown() {
        assert_eq!(classify(&json!({"foo": "bar"})), MessageKind::Unknown);
    }
}
