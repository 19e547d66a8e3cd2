//! Fluent query builder
//!
//! Accumulates filter conditions, sort directives, pagination bounds, field
//! projections, and aggregation requests in call order, and compiles them
//! into one [`SearchRequest`] on [`build`](QueryBuilder::build).

use serde_json::Value;

use super::aggregation::plan_aggregations;
use super::ast::{
    Condition, Connective, FilterValue, MetricKind, MetricRequest, Operator, RecordedOperator,
    SortDirection, SortSpec,
};
use super::compile::{compile_query, object};
use super::errors::QueryResult;
use super::request::SearchRequest;

/// Fluent builder for search requests.
///
/// Every call mutates the builder and returns it, so calls chain. `build`
/// only reads state: it can be called repeatedly, and the builder can keep
/// recording between builds.
///
/// ```
/// use elastiq::query::{Operator, QueryBuilder};
///
/// let request = QueryBuilder::new()
///     .filter("age", Operator::Gte, 25)
///     .or_filter("status", Operator::Eq, "active")
///     .order_by_desc("age")
///     .limit(20)
///     .build()?;
/// # Ok::<(), elastiq::query::QueryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    conditions: Vec<Condition>,
    sorts: Vec<SortSpec>,
    offset: Option<u64>,
    limit: Option<u64>,
    fields: Option<Vec<String>>,
    group_by: Option<String>,
    metrics: Vec<MetricRequest>,
}

impl QueryBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    fn push_condition(
        mut self,
        connective: Connective,
        field: impl Into<String>,
        operator: RecordedOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.conditions.push(Condition {
            connective,
            field: field.into(),
            operator,
            value: value.into(),
        });
        self
    }

    /// Records an AND condition
    pub fn filter(
        self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.push_condition(
            Connective::And,
            field,
            RecordedOperator::Typed(operator),
            value,
        )
    }

    /// Records an AND condition; alias of [`filter`](Self::filter)
    pub fn and_filter(
        self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.filter(field, operator, value)
    }

    /// Records an OR condition
    pub fn or_filter(
        self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.push_condition(
            Connective::Or,
            field,
            RecordedOperator::Typed(operator),
            value,
        )
    }

    /// Records an AND condition with an unvalidated operator spelling.
    ///
    /// Intended for operators arriving as strings, e.g. from request query
    /// parameters. The spelling is validated during [`build`](Self::build);
    /// an unknown operator fails compilation with
    /// [`QueryError::UnsupportedOperator`](super::QueryError::UnsupportedOperator).
    pub fn filter_raw(
        self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.push_condition(
            Connective::And,
            field,
            RecordedOperator::Raw(operator.into()),
            value,
        )
    }

    /// Appends a sort directive
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sorts.push(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    /// Appends an ascending sort directive (the default direction)
    pub fn order_by_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, SortDirection::Asc)
    }

    /// Appends a descending sort directive
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, SortDirection::Desc)
    }

    /// Sets the result limit (`size`)
    pub fn limit(mut self, size: u64) -> Self {
        self.limit = Some(size);
        self
    }

    /// Sets the result offset (`from`)
    pub fn offset(mut self, from: u64) -> Self {
        self.offset = Some(from);
        self
    }

    /// Restricts returned documents to the given fields (`_source`)
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Buckets results by terms of the given field
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group_by = Some(field.into());
        self
    }

    fn push_metric(mut self, kind: MetricKind, field: Option<String>) -> Self {
        self.metrics.push(MetricRequest { kind, field });
        self
    }

    /// Requests the implicit document count.
    ///
    /// Compiles to no explicit aggregation entry: the backend reports a
    /// document count on every bucket and response regardless.
    pub fn count(self) -> Self {
        self.push_metric(MetricKind::Count, None)
    }

    /// Requests a count of non-null values of the given field
    pub fn count_field(self, field: impl Into<String>) -> Self {
        self.push_metric(MetricKind::Count, Some(field.into()))
    }

    /// Requests the average of the given field
    pub fn avg(self, field: impl Into<String>) -> Self {
        self.push_metric(MetricKind::Avg, Some(field.into()))
    }

    /// Requests the sum of the given field
    pub fn sum(self, field: impl Into<String>) -> Self {
        self.push_metric(MetricKind::Sum, Some(field.into()))
    }

    /// Requests the minimum of the given field
    pub fn min(self, field: impl Into<String>) -> Self {
        self.push_metric(MetricKind::Min, Some(field.into()))
    }

    /// Requests the maximum of the given field
    pub fn max(self, field: impl Into<String>) -> Self {
        self.push_metric(MetricKind::Max, Some(field.into()))
    }

    /// Compiles the recorded state into a search request document.
    ///
    /// Reads state only; repeated calls on an unmutated builder yield
    /// structurally equal documents.
    pub fn build(&self) -> QueryResult<SearchRequest> {
        Ok(SearchRequest {
            query: compile_query(&self.conditions)?,
            sort: if self.sorts.is_empty() {
                None
            } else {
                Some(self.sorts.iter().map(sort_entry).collect())
            },
            from: self.offset,
            size: self.limit,
            source: self.fields.clone(),
            aggs: plan_aggregations(self.group_by.as_deref(), &self.metrics),
        })
    }

    /// Compiles and serializes the request to a compact JSON string
    pub fn to_json(&self) -> QueryResult<String> {
        Ok(serde_json::to_string(&self.build()?)?)
    }

    /// Compiles and serializes the request to a pretty-printed JSON string
    pub fn to_json_pretty(&self) -> QueryResult<String> {
        Ok(serde_json::to_string_pretty(&self.build()?)?)
    }

    /// Logs the compiled request at debug level and returns the builder,
    /// preserving the chain
    pub fn debug(self) -> Self {
        match self.to_json_pretty() {
            Ok(body) => tracing::debug!(query = %body, "compiled search query"),
            Err(err) => tracing::debug!(error = %err, "search query failed to compile"),
        }
        self
    }
}

fn sort_entry(spec: &SortSpec) -> Value {
    object(
        spec.field.as_str(),
        object("order", Value::from(spec.direction.as_str())),
    )
}
