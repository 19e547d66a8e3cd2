//! Query AST structures
//!
//! Defines the recorded representation a [`QueryBuilder`](super::QueryBuilder)
//! accumulates before compilation: conditions, sort directives, and
//! aggregation requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::QueryError;

/// Boolean connective attaching a condition to the ones recorded before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// Condition must hold together with the current run
    And,
    /// Condition opens or extends an alternative branch
    Or,
}

/// Comparison operators
///
/// Closed set; never extended at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Equality
    #[serde(rename = "eq")]
    Eq,

    /// Strictly greater than
    #[serde(rename = "gt")]
    Gt,

    /// Strictly less than
    #[serde(rename = "lt")]
    Lt,

    /// Greater than or equal
    #[serde(rename = "gte")]
    Gte,

    /// Less than or equal
    #[serde(rename = "lte")]
    Lte,

    /// Value in list
    #[serde(rename = "in")]
    In,
}

impl Operator {
    /// Returns the wire spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::In => "in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Operator::Eq),
            "gt" => Ok(Operator::Gt),
            "lt" => Ok(Operator::Lt),
            "gte" => Ok(Operator::Gte),
            "lte" => Ok(Operator::Lte),
            "in" => Ok(Operator::In),
            other => Err(QueryError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// Operator as recorded on a condition
///
/// Fluent calls record the typed form. The raw form exists for operators
/// arriving as strings (e.g. parsed out of request parameters) and is
/// validated when the query is compiled, not when it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedOperator {
    Typed(Operator),
    Raw(String),
}

impl RecordedOperator {
    /// Resolves to a typed operator, failing on unknown raw spellings
    pub fn resolve(&self) -> Result<Operator, QueryError> {
        match self {
            RecordedOperator::Typed(op) => Ok(*op),
            RecordedOperator::Raw(s) => s.parse(),
        }
    }
}

/// A single scalar condition value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<&Scalar> for Value {
    fn from(scalar: &Scalar) -> Self {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::from(*i),
            Scalar::Float(f) => Value::from(*f),
            Scalar::Str(s) => Value::String(s.clone()),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// A condition value: one scalar, or a list of scalars for `in`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl From<&FilterValue> for Value {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::Scalar(s) => Value::from(s),
            FilterValue::List(items) => Value::Array(items.iter().map(Value::from).collect()),
        }
    }
}

macro_rules! scalar_into_filter_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(v: $ty) -> Self {
                    FilterValue::Scalar(v.into())
                }
            }
        )*
    };
}

scalar_into_filter_value!(bool, i32, i64, u32, f64, &str, String);

impl From<Scalar> for FilterValue {
    fn from(v: Scalar) -> Self {
        FilterValue::Scalar(v)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// A recorded filter condition
///
/// Immutable once recorded; recording order is semantically significant and
/// is the sole determinant of boolean grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// How the condition attaches to the preceding ones
    pub connective: Connective,
    /// Field the condition applies to
    pub field: String,
    /// Comparison operator
    pub operator: RecordedOperator,
    /// Value to compare against
    pub value: FilterValue,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A recorded sort directive; recording order is output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Metric aggregation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Count,
    Avg,
    Sum,
    Min,
    Max,
}

impl MetricKind {
    /// Returns the aggregation name used in output keys and bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Count => "count",
            MetricKind::Avg => "avg",
            MetricKind::Sum => "sum",
            MetricKind::Min => "min",
            MetricKind::Max => "max",
        }
    }
}

/// A recorded metric request
///
/// `field` is present for every kind except `Count`, where `None` means
/// "use the implicit document count" and compiles to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRequest {
    pub kind: MetricKind,
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_round_trip() {
        for op in [
            Operator::Eq,
            Operator::Gt,
            Operator::Lt,
            Operator::Gte,
            Operator::Lte,
            Operator::In,
        ] {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_operator_rejects_unknown() {
        let err = "like".parse::<Operator>().unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedOperator(op) if op == "like"));
    }

    #[test]
    fn test_recorded_operator_resolution() {
        assert_eq!(
            RecordedOperator::Typed(Operator::Gte).resolve().unwrap(),
            Operator::Gte
        );
        assert_eq!(
            RecordedOperator::Raw("in".to_string()).resolve().unwrap(),
            Operator::In
        );
        assert!(RecordedOperator::Raw("between".to_string())
            .resolve()
            .is_err());
    }

    #[test]
    fn test_filter_value_conversions() {
        assert_eq!(Value::from(&FilterValue::from(25)), json!(25));
        assert_eq!(Value::from(&FilterValue::from("active")), json!("active"));
        assert_eq!(Value::from(&FilterValue::from(true)), json!(true));
        assert_eq!(
            Value::from(&FilterValue::from(vec!["a", "b"])),
            json!(["a", "b"])
        );
    }

    #[test]
    fn test_sort_direction_defaults_to_asc() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
        assert_eq!(SortSpec::asc("age").direction.as_str(), "asc");
        assert_eq!(SortSpec::desc("age").direction.as_str(), "desc");
    }
}
