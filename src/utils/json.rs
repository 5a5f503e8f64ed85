//! JSON Parsing Utilities

use crate::error::{ChainError, ChainResult, ErrorCode};
use serde::de::DeserializeOwned;

/// Parse a JSON document into `T`, mapping failures to `JsonError`
pub fn parse_json<T: DeserializeOwned>(json_str: &str) -> ChainResult<T> {
    serde_json::from_str(json_str)
        .map_err(|e| ChainError::new(ErrorCode::JsonError, format!("JSON parse error: {}", e)))
}

/// Read a u64 that amino JSON may carry either as a number or a decimal string
pub fn get_json_u64(value: &serde_json::Value, field: &str) -> Option<u64> {
    value.get(field).and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    })
}
