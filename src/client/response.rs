//! Backend response models
//!
//! Covers the subset of the wire responses the repository layer reads.
//! Unknown fields are ignored so the models track multiple backend versions.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Response to a document index call
#[derive(Debug, Clone, Deserialize)]
pub struct IndexResponse {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub result: String,
}

/// Response to a document get call
#[derive(Debug, Clone, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

/// Response to a document update call
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub result: String,
}

/// Response to a document delete call
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub result: String,
}

/// Response to a bulk call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<Value>,
}

/// Response to a delete-by-query call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteByQueryResponse {
    #[serde(default)]
    pub deleted: u64,
}

/// Response to a search call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: Option<Map<String, Value>>,
}

/// Hit envelope of a search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total hit count, as either shape the backend emits.
///
/// Older backends report a bare number, newer ones `{value, relation}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Detailed { value: u64 },
}

impl TotalHits {
    /// Returns the numeric count regardless of wire shape
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(value) | TotalHits::Detailed { value } => *value,
        }
    }
}

/// One search hit
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

/// One group-by bucket
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    /// Distinct value of the bucketed field
    pub key: Value,
    /// Implicit per-bucket document count
    #[serde(default)]
    pub doc_count: u64,
    /// Nested metric results, keyed as requested
    #[serde(flatten)]
    pub aggregations: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_hits_both_shapes() {
        let bare: TotalHits = serde_json::from_value(json!(100)).unwrap();
        let detailed: TotalHits =
            serde_json::from_value(json!({"value": 100, "relation": "eq"})).unwrap();
        assert_eq!(bare.value(), 100);
        assert_eq!(detailed.value(), 100);
    }

    #[test]
    fn test_search_response_decoding() {
        let response: SearchResponse = serde_json::from_value(json!({
            "took": 3,
            "hits": {
                "total": {"value": 2},
                "hits": [
                    {"_id": "1", "_source": {"name": "Alice"}},
                    {"_id": "2", "_source": {"name": "Bob"}},
                ],
            },
        }))
        .unwrap();
        assert_eq!(response.hits.hits.len(), 2);
        assert_eq!(response.hits.total.unwrap().value(), 2);
        assert!(response.aggregations.is_none());
    }

    #[test]
    fn test_bucket_decoding_with_nested_metrics() {
        let bucket: Bucket = serde_json::from_value(json!({
            "key": "active",
            "doc_count": 10,
            "avg_age": {"value": 31.5},
        }))
        .unwrap();
        assert_eq!(bucket.key, json!("active"));
        assert_eq!(bucket.doc_count, 10);
        assert_eq!(bucket.aggregations["avg_age"], json!({"value": 31.5}));
    }
}
