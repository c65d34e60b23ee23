//! Log list document types.
//!
//! Mirrors the JSON published alongside the detached signature:
//!
//! ```json
//! {
//!   "operators": [ { "id": 0, "name": "Google" } ],
//!   "logs": [ { "description": "...", "url": "...", "maximum_merge_delay": 86400,
//!               "operated_by": [0], "key": "<base64 SPKI>", "disqualified_at": 1530000000 } ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CtListError, CtListResult};

/// Parsed log list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogList {
    /// Log operators.
    pub operators: Vec<Operator>,

    /// Log entries, kept as raw JSON so each record can carry its
    /// provenance verbatim. See [`LogEntry::from_value`].
    pub logs: Vec<serde_json::Value>,
}

impl LogList {
    /// Parse a log list document.
    pub fn from_slice(bytes: &[u8]) -> CtListResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| CtListError::JsonShape {
            message: format!("log list: {e}"),
        })
    }
}

/// Opaque operator identifier: an integer in v1 lists, a string elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperatorId {
    Int(i64),
    Text(String),
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id:?}"),
        }
    }
}

/// A log operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    pub name: String,
}

/// The fields of a log entry this tool interprets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,

    pub url: String,

    /// Maximum merge delay in seconds.
    pub maximum_merge_delay: u64,

    pub operated_by: Vec<OperatorId>,

    /// Base64 DER SubjectPublicKeyInfo.
    pub key: String,

    /// Unix timestamp after which the log is no longer trusted.
    #[serde(default)]
    pub disqualified_at: Option<i64>,
}

impl LogEntry {
    /// Interpret the `index`-th raw log entry.
    pub fn from_value(index: usize, value: &serde_json::Value) -> CtListResult<Self> {
        Self::deserialize(value).map_err(|e| CtListError::JsonShape {
            message: format!("logs[{index}]: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_ids_are_opaque() {
        let list = LogList::from_slice(
            br#"{"operators": [{"id": 0, "name": "Google"}, {"id": "cf", "name": "Cloudflare"}], "logs": []}"#,
        )
        .unwrap();
        assert_eq!(list.operators[0].id, OperatorId::Int(0));
        assert_eq!(list.operators[1].id, OperatorId::Text("cf".to_string()));
        assert_eq!(list.operators[1].id.to_string(), "\"cf\"");
    }

    #[test]
    fn test_missing_logs_is_shape_error() {
        let err = LogList::from_slice(br#"{"operators": []}"#).unwrap_err();
        assert!(matches!(err, CtListError::JsonShape { .. }));
        assert!(err.to_string().contains("logs"));
    }

    #[test]
    fn test_not_json_is_shape_error() {
        let err = LogList::from_slice(b"<html>").unwrap_err();
        assert!(matches!(err, CtListError::JsonShape { .. }));
    }

    #[test]
    fn test_entry_optional_disqualification() {
        let entry = LogEntry::from_value(
            0,
            &json!({
                "description": "Test log",
                "url": "ct.example.com/",
                "maximum_merge_delay": 86400,
                "operated_by": [0],
                "key": "AAAA",
                "dns_api_endpoint": "ignored.example.com"
            }),
        )
        .unwrap();
        assert_eq!(entry.disqualified_at, None);
        assert_eq!(entry.maximum_merge_delay, 86400);
    }

    #[test]
    fn test_entry_shape_error_names_index() {
        let err = LogEntry::from_value(
            3,
            &json!({ "description": "Test log", "url": "ct.example.com/" }),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("logs[3]"), "{message}");
        assert!(message.contains("maximum_merge_delay"), "{message}");
    }

    #[test]
    fn test_negative_merge_delay_rejected() {
        let err = LogEntry::from_value(
            0,
            &json!({
                "description": "Test log",
                "url": "ct.example.com/",
                "maximum_merge_delay": -1,
                "operated_by": [0],
                "key": "AAAA"
            }),
        )
        .unwrap_err();
        assert!(matches!(err, CtListError::JsonShape { .. }));
    }
}
