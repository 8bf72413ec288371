//! Message Parser: decode → classify → validate, each stage independently
//! optional. Never a hard error — an unparseable payload is still recorded,
//! just without a decoded form or classification.

mod classify;
mod decode;
mod model;
mod validate;

pub use model::{MessageKind, ParsedMessage, ValidatedEvent};

/// Run the full pipeline over a raw payload.
pub fn parse(payload: &[u8]) -> ParsedMessage {
    let decoded = decode::decode(payload);
    let kind = decoded
        .as_ref()
        .map(classify::classify)
        .unwrap_or(MessageKind::Unknown);
    let validated = decoded.as_ref().and_then(|doc| validate::validate(&kind, doc));

    ParsedMessage {
        kind,
        decoded,
        validated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pipeline_classifies_and_validates_action() {
        let payload = br#"{"type":"ACTION","agent_id":"a1","session_key":"s1","action":{"tool":"x"},"timestamp":1}"#;
        let parsed = parse(payload);
        assert_eq!(parsed.kind, MessageKind::Action);
        assert!(parsed.validated.is_some());
    }

    #[test]
    fn undecodable_payload_yields_unknown_with_nothing_else() {
        let parsed = parse(b"not json at all");
        assert_eq!(parsed.kind, MessageKind::Unknown);
        assert!(parsed.decoded.is_none());
        assert!(parsed.validated.is_none());
    }

    #[test]
    fn classified_but_unvalidated_message_keeps_decoded_form() {
        let parsed = parse(br#"{"type":"ACTION","agent_id":"a1"}"#);
        assert_eq!(parsed.kind, MessageKind::Action);
        assert!(parsed.decoded.is_some());
        assert!(parsed.validated.is_none());
    }

    #[test]
    fn unrecognized_type_is_preserved_and_skips_validation() {
        let parsed = parse(br#"{"type":"SOMETHING_NEW","x":1}"#);
        assert_eq!(parsed.kind, MessageKind::Other("SOMETHING_NEW".to_string()));
        assert!(parsed.validated.is_none());
    }
}
