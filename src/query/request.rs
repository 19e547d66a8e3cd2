//! Compiled output document
//!
//! The wire contract with the search backend: a structure with optional
//! keys, each present only when the builder recorded something for it.

use serde::Serialize;
use serde_json::{Map, Value};

/// A compiled search request body.
///
/// `query` is always present (defaulting to match-all); every other key is
/// omitted from the serialized form unless it was explicitly requested.
/// The `query` sub-structure stands on its own so callers can forward just
/// the filter part (delete-by-query).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Boolean query tree
    pub query: Value,

    /// Sort entries, in recording order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Value>>,

    /// Result offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,

    /// Result limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Field projection list
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<String>>,

    /// Named aggregations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggs: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_keys_are_omitted() {
        let request = SearchRequest {
            query: json!({"match_all": {}}),
            sort: None,
            from: None,
            size: None,
            source: None,
            aggs: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": {"match_all": {}}})
        );
    }

    #[test]
    fn test_projection_serializes_as_source() {
        let request = SearchRequest {
            query: json!({"match_all": {}}),
            sort: None,
            from: Some(10),
            size: Some(20),
            source: Some(vec!["name".to_string(), "age".to_string()]),
            aggs: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": {"match_all": {}},
                "from": 10,
                "size": 20,
                "_source": ["name", "age"],
            })
        );
    }
}
