//! Persisted record shape shared with the remote endpoint.
//!
//! Writes are a full replace-set of records per document; reads may come
//! back in any order and are re-sorted client-side. `content` is a
//! JSON-encoded string so the endpoint never needs to understand block
//! payloads, including ones from kinds it has never seen.

use serde::{Deserialize, Serialize};

/// One flat persisted block record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// Block kind discriminant
    #[serde(rename = "type")]
    pub kind: String,

    /// JSON-encoded content payload
    pub content: String,

    /// Position among siblings sharing `parent_block_id`
    pub order_index: usize,

    #[serde(default)]
    pub parent_block_id: Option<String>,

    /// Client-side block id. Optional on the wire: the endpoint may drop it,
    /// in which case ids are regenerated on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_type_column() {
        let record = PersistedRecord {
            kind: "heading".to_string(),
            content: "{\"text\":\"Hi\",\"level\":2}".to_string(),
            order_index: 0,
            parent_block_id: None,
            id: Some("abc-1".to_string()),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "heading");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn missing_optional_columns_default() {
        let record: PersistedRecord = serde_json::from_str(
            r#"{"type":"text","content":"{}","order_index":3}"#,
        )
        .unwrap();
        assert_eq!(record.parent_block_id, None);
        assert_eq!(record.id, None);
        assert_eq!(record.order_index, 3);
    }
}
