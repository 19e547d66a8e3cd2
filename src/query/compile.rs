//! Leaf compilation and boolean grouping
//!
//! Turns recorded conditions into backend clauses: each condition becomes a
//! term/range/terms leaf, and the ordered condition list folds into one
//! nested boolean query.

use serde_json::{Map, Value};

use super::ast::{Condition, Connective, Operator};
use super::errors::QueryResult;

/// Builds a single-key JSON object
pub(crate) fn object(key: impl Into<String>, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.into(), value);
    Value::Object(map)
}

/// Compiles one condition into its leaf clause.
///
/// Raw operator spellings are validated here, so an unsupported operator
/// fails the whole `build()` instead of silently miscompiling.
pub(crate) fn compile_leaf(condition: &Condition) -> QueryResult<Value> {
    let operator = condition.operator.resolve()?;
    let field = condition.field.as_str();
    let value = Value::from(&condition.value);
    let clause = match operator {
        Operator::Eq => object("term", object(field, value)),
        Operator::Gt => object("range", object(field, object("gt", value))),
        Operator::Lt => object("range", object(field, object("lt", value))),
        Operator::Gte => object("range", object(field, object("gte", value))),
        Operator::Lte => object("range", object(field, object("lte", value))),
        Operator::In => object("terms", object(field, value)),
    };
    Ok(clause)
}

/// Wraps a closed AND run as an explicit must group.
///
/// Runs are always wrapped, even single-element ones, so every should branch
/// produced from a run has the same shape.
fn must_group(run: Vec<Value>) -> Value {
    object("bool", object("must", Value::Array(run)))
}

/// Folds the ordered condition list into one boolean query tree.
///
/// Grouping is positional, not algebraic: an OR closes the AND run recorded
/// before it into a single branch, in call order. No reordering or
/// deduplication happens.
pub(crate) fn compile_query(conditions: &[Condition]) -> QueryResult<Value> {
    let mut must: Vec<Value> = Vec::new();
    let mut should: Vec<Value> = Vec::new();
    let mut last = Connective::And;

    for condition in conditions {
        let leaf = compile_leaf(condition)?;
        match condition.connective {
            Connective::And => {
                must.push(leaf);
                last = Connective::And;
            }
            Connective::Or => {
                if last == Connective::And && !must.is_empty() {
                    should.push(must_group(std::mem::take(&mut must)));
                }
                should.push(leaf);
                last = Connective::Or;
            }
        }
    }

    let query = if !should.is_empty() {
        // Any still-open AND run becomes the final branch.
        if !must.is_empty() {
            should.push(must_group(must));
        }
        object("bool", object("should", Value::Array(should)))
    } else if !must.is_empty() {
        object("bool", object("must", Value::Array(must)))
    } else {
        object("match_all", Value::Object(Map::new()))
    };
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ast::{FilterValue, RecordedOperator};
    use serde_json::json;

    fn and(field: &str, operator: Operator, value: impl Into<FilterValue>) -> Condition {
        Condition {
            connective: Connective::And,
            field: field.to_string(),
            operator: RecordedOperator::Typed(operator),
            value: value.into(),
        }
    }

    fn or(field: &str, operator: Operator, value: impl Into<FilterValue>) -> Condition {
        Condition {
            connective: Connective::Or,
            ..and(field, operator, value)
        }
    }

    #[test]
    fn test_leaf_mapping_is_total() {
        let cases = [
            (Operator::Eq, json!({"term": {"age": 25}})),
            (Operator::Gt, json!({"range": {"age": {"gt": 25}}})),
            (Operator::Lt, json!({"range": {"age": {"lt": 25}}})),
            (Operator::Gte, json!({"range": {"age": {"gte": 25}}})),
            (Operator::Lte, json!({"range": {"age": {"lte": 25}}})),
        ];
        for (operator, expected) in cases {
            assert_eq!(compile_leaf(&and("age", operator, 25)).unwrap(), expected);
        }
        assert_eq!(
            compile_leaf(&and("status", Operator::In, vec!["active", "pending"])).unwrap(),
            json!({"terms": {"status": ["active", "pending"]}})
        );
    }

    #[test]
    fn test_raw_operator_compiles_like_typed() {
        let condition = Condition {
            connective: Connective::And,
            field: "age".to_string(),
            operator: RecordedOperator::Raw("gte".to_string()),
            value: FilterValue::from(25),
        };
        assert_eq!(
            compile_leaf(&condition).unwrap(),
            json!({"range": {"age": {"gte": 25}}})
        );
    }

    #[test]
    fn test_unknown_raw_operator_fails() {
        let condition = Condition {
            connective: Connective::And,
            field: "age".to_string(),
            operator: RecordedOperator::Raw("between".to_string()),
            value: FilterValue::from(25),
        };
        assert!(compile_leaf(&condition).is_err());
    }

    #[test]
    fn test_empty_conditions_match_all() {
        assert_eq!(compile_query(&[]).unwrap(), json!({"match_all": {}}));
    }

    #[test]
    fn test_pure_and_run_is_not_double_wrapped() {
        let query = compile_query(&[
            and("age", Operator::Gte, 25),
            and("status", Operator::Eq, "active"),
        ])
        .unwrap();
        assert_eq!(
            query,
            json!({"bool": {"must": [
                {"range": {"age": {"gte": 25}}},
                {"term": {"status": "active"}},
            ]}})
        );
    }

    #[test]
    fn test_or_closes_preceding_and_run() {
        let query = compile_query(&[
            and("age", Operator::Gte, 25),
            or("status", Operator::Eq, "active"),
        ])
        .unwrap();
        assert_eq!(
            query,
            json!({"bool": {"should": [
                {"bool": {"must": [{"range": {"age": {"gte": 25}}}]}},
                {"term": {"status": "active"}},
            ]}})
        );
    }

    #[test]
    fn test_trailing_and_run_flushes_as_branch() {
        let query = compile_query(&[
            or("role", Operator::Eq, "admin"),
            and("age", Operator::Gte, 25),
            and("status", Operator::Eq, "active"),
        ])
        .unwrap();
        assert_eq!(
            query,
            json!({"bool": {"should": [
                {"term": {"role": "admin"}},
                {"bool": {"must": [
                    {"range": {"age": {"gte": 25}}},
                    {"term": {"status": "active"}},
                ]}},
            ]}})
        );
    }

    #[test]
    fn test_positional_grouping_two_ands_before_or() {
        // The two leading AND conditions group as ONE branch.
        let query = compile_query(&[
            and("age", Operator::Gte, 25),
            and("status", Operator::In, vec!["active", "pending"]),
            or("role", Operator::Eq, "admin"),
        ])
        .unwrap();
        assert_eq!(
            query,
            json!({"bool": {"should": [
                {"bool": {"must": [
                    {"range": {"age": {"gte": 25}}},
                    {"terms": {"status": ["active", "pending"]}},
                ]}},
                {"term": {"role": "admin"}},
            ]}})
        );
    }
}
