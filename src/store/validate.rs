//! Validation Gate Module
//!
//! Pure admission checks run by the store during `create`. No state.

use crate::error::{Result, StoreError};
use crate::store::{MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Key Validation ==
/// Checks that a key does not exceed the maximum length.
///
/// Length is counted in characters, not bytes, so a multi-byte key of 32
/// characters is accepted.
pub fn validate_key(key: &str) -> Result<()> {
    let len = key.chars().count();
    if len > MAX_KEY_LENGTH {
        return Err(StoreError::KeyTooLong {
            actual: len,
            limit: MAX_KEY_LENGTH,
        });
    }
    Ok(())
}

// == Payload Validation ==
/// Checks that a payload is syntactically valid JSON within the size limit.
///
/// Size is the actual encoded UTF-8 byte length, never an approximation, so
/// multi-byte content cannot slip past the limit undercounted.
pub fn validate_payload(payload: &str) -> Result<()> {
    if payload.len() > MAX_VALUE_SIZE {
        return Err(StoreError::ValueTooLarge {
            actual: payload.len(),
            limit: MAX_VALUE_SIZE,
        });
    }

    serde_json::from_str::<serde::de::IgnoredAny>(payload)
        .map_err(|e| StoreError::MalformedJson(e.to_string()))?;

    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_key() {
        assert!(validate_key("session-token").is_ok());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH)).is_ok());
    }

    #[test]
    fn test_key_too_long() {
        let key = "x".repeat(MAX_KEY_LENGTH + 1);
        let result = validate_key(&key);
        assert!(matches!(
            result,
            Err(StoreError::KeyTooLong { actual: 33, .. })
        ));
    }

    #[test]
    fn test_key_length_counted_in_characters() {
        // 32 three-byte characters: 96 bytes but still a valid key
        let key = "\u{3042}".repeat(MAX_KEY_LENGTH);
        assert!(validate_key(&key).is_ok());
    }

    #[test]
    fn test_valid_payloads() {
        assert!(validate_payload("{\"a\": 1}").is_ok());
        assert!(validate_payload("[1, 2, 3]").is_ok());
        assert!(validate_payload("\"just a string\"").is_ok());
        assert!(validate_payload("42").is_ok());
        assert!(validate_payload("null").is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let result = validate_payload("{not json");
        assert!(matches!(result, Err(StoreError::MalformedJson(_))));

        let result = validate_payload("");
        assert!(matches!(result, Err(StoreError::MalformedJson(_))));
    }

    #[test]
    fn test_value_too_large() {
        // A 16 KB JSON string plus quotes crosses the limit
        let payload = format!("\"{}\"", "x".repeat(MAX_VALUE_SIZE));
        let result = validate_payload(&payload);
        assert!(matches!(result, Err(StoreError::ValueTooLarge { .. })));
    }

    #[test]
    fn test_value_at_limit() {
        // Exactly 16 384 encoded bytes is accepted
        let payload = format!("\"{}\"", "x".repeat(MAX_VALUE_SIZE - 2));
        assert_eq!(payload.len(), MAX_VALUE_SIZE);
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_size_measured_in_encoded_bytes() {
        // 8 192 three-byte characters encode to 24 576 bytes, over the limit
        // even though the character count is well under it
        let payload = format!("\"{}\"", "\u{3042}".repeat(MAX_VALUE_SIZE / 2));
        let result = validate_payload(&payload);
        assert!(matches!(result, Err(StoreError::ValueTooLarge { .. })));
    }

    #[test]
    fn test_size_checked_before_parse() {
        // Oversized garbage reports the size problem, not the syntax problem
        let payload = "x".repeat(MAX_VALUE_SIZE + 1);
        let result = validate_payload(&payload);
        assert!(matches!(result, Err(StoreError::ValueTooLarge { .. })));
    }
}
