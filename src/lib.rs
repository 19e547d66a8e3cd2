//! elastiq - fluent query compiler and repository layer for
//! Elasticsearch-compatible search backends
//!
//! The [`query::QueryBuilder`] records filter conditions, sort directives,
//! pagination bounds, field projections, and aggregation requests through a
//! fluent API and compiles them into one search request document. The
//! [`repository::Repository`] dispatches compiled requests and CRUD calls
//! over a [`client::SearchBackend`], invoking [`entity::Entity`] lifecycle
//! hooks along the way.

pub mod client;
pub mod entity;
pub mod query;
pub mod repository;

pub use client::{ClientError, HttpClient, SearchBackend};
pub use entity::Entity;
pub use query::{Operator, QueryBuilder, QueryError, SearchRequest, SortDirection};
pub use repository::{Page, Repository, RepositoryError};
