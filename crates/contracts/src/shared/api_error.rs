//! Тело ответа API с ошибкой.
//!
//! The API answers errors either as `{"detail": "..."}`, as a validation list
//! `{"detail": [{"msg": "...", ...}]}`, or as `{"message": "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse a raw response body; anything that is not a JSON object yields `None`
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Human-readable message, `detail` first
    pub fn message(&self) -> Option<String> {
        self.detail_message().or_else(|| {
            self.message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
    }

    fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Array(entries) => entries
                .iter()
                .find_map(|e| e.get("msg").and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }
}
