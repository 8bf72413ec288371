//! Stage 1: treat the payload as UTF-8 bytes of a JSON document.

use serde_json::Value;

/// Returns `None` on anything that isn't valid UTF-8 JSON; decode failure is
/// data, not an error — the caller still records the raw payload.
pub fn decode(payload: &[u8]) -> Option<Value> {
    let text = std::str::from_utf8(payload).ok()?;
    serde_json::from_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_valid_json_object() {
        let decoded = decode(br#"{"type":"COMMS","from":"a"}"#).unwrap();
        assert_eq!(decoded["type"], "COMMS");
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(decode(&[0xff, 0xfe, 0xfd]).is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(decode(b"{not json").is_none());
    }
}
