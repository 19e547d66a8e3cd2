//! Query compilation
//!
//! The fluent [`QueryBuilder`] records conditions, sorts, pagination,
//! projections, and aggregation requests, and compiles them into a single
//! [`SearchRequest`] document for the search backend.

mod aggregation;
mod ast;
mod builder;
mod compile;
mod errors;
mod request;

pub use ast::{
    Condition, Connective, FilterValue, MetricKind, MetricRequest, Operator, RecordedOperator,
    Scalar, SortDirection, SortSpec,
};
pub use builder::QueryBuilder;
pub use errors::{QueryError, QueryResult};
pub use request::SearchRequest;
