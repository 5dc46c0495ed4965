//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The JSON payload to store
/// - `ttl`: Optional TTL in seconds (uses the configured default if absent)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The payload to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetRequest {
    /// Validates the request data.
    ///
    /// A non-positive TTL is rejected here, at the boundary, before the
    /// cache sees the write. Returns an error message if validation fails,
    /// None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if let Some(ttl) = self.ttl {
            if ttl <= 0 {
                return Some(format!("TTL must be positive, got {}", ttl));
            }
        }
        None
    }

    /// The validated TTL as the cache expects it.
    pub fn ttl_seconds(&self) -> Option<u64> {
        self.ttl.map(|ttl| ttl as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, json!("hello"));
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_with_structured_value() {
        let json = r#"{"key": "user:42", "value": {"name": "Ada"}, "ttl": 300}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, json!({"name": "Ada"}));
        assert_eq!(req.ttl, Some(300));
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: json!("test"),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let req = SetRequest {
            key: "key".to_string(),
            value: json!("test"),
            ttl: Some(0),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_rejects_negative_ttl() {
        let req = SetRequest {
            key: "key".to_string(),
            value: json!("test"),
            ttl: Some(-5),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            key: "valid_key".to_string(),
            value: json!("test"),
            ttl: Some(60),
        };
        assert!(req.validate().is_none());
        assert_eq!(req.ttl_seconds(), Some(60));
    }
}
