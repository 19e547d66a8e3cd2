//! Aggregation planning
//!
//! Compiles recorded group-by/metric requests into the `aggs` section of the
//! output document: either a flat map of named metrics, or one `group_by`
//! terms bucket holding the metrics as sub-aggregations.

use serde_json::{Map, Value};

use super::ast::{MetricKind, MetricRequest};
use super::compile::object;

/// Plans the aggregation map, or `None` when nothing was requested.
///
/// Metric keys are `{kind}_{field}`; a later request with the same kind and
/// field overwrites the earlier one. `count` without a field emits nothing,
/// since the backend reports a document count on every bucket anyway.
pub(crate) fn plan_aggregations(
    group_by: Option<&str>,
    metrics: &[MetricRequest],
) -> Option<Map<String, Value>> {
    if group_by.is_none() && metrics.is_empty() {
        return None;
    }

    let mut entries = Map::new();
    for metric in metrics {
        match (metric.kind, metric.field.as_deref()) {
            (MetricKind::Count, Some(field)) => {
                entries.insert(
                    format!("count_{field}"),
                    object("value_count", object("field", Value::from(field))),
                );
            }
            // Doc count is implicit in every response.
            (MetricKind::Count, None) => {}
            (kind, Some(field)) => {
                entries.insert(
                    format!("{}_{}", kind.as_str(), field),
                    object(kind.as_str(), object("field", Value::from(field))),
                );
            }
            // Unreachable through the builder API: avg/sum/min/max always
            // record a field.
            (_, None) => {}
        }
    }

    let aggregations = match group_by {
        Some(field) => {
            let mut bucket = Map::new();
            bucket.insert("terms".to_string(), object("field", Value::from(field)));
            bucket.insert("aggs".to_string(), Value::Object(entries));
            let mut outer = Map::new();
            outer.insert("group_by".to_string(), Value::Object(bucket));
            outer
        }
        None => entries,
    };
    Some(aggregations)
}
