//! Search backend interface
//!
//! The repository layer depends on this trait rather than a concrete
//! transport, so tests substitute an in-memory backend.

use async_trait::async_trait;
use serde_json::Value;

use super::errors::ClientResult;
use super::response::{
    BulkResponse, DeleteByQueryResponse, DeleteResponse, GetResponse, IndexResponse,
    SearchResponse, UpdateResponse,
};
use crate::query::SearchRequest;

/// Operations a search backend must support.
///
/// Object-safe; repositories hold an `Arc<dyn SearchBackend>`.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Indexes one document, letting the backend assign the id
    async fn index(&self, index: &str, document: Value) -> ClientResult<IndexResponse>;

    /// Indexes many documents in one bulk call
    async fn bulk(&self, index: &str, documents: Vec<Value>) -> ClientResult<BulkResponse>;

    /// Fetches one document by id
    async fn get(&self, index: &str, id: &str) -> ClientResult<GetResponse>;

    /// Applies a partial update; with `upsert` the partial becomes the
    /// document when none exists yet
    async fn update(
        &self,
        index: &str,
        id: &str,
        document: Value,
        upsert: bool,
    ) -> ClientResult<UpdateResponse>;

    /// Deletes one document by id
    async fn delete(&self, index: &str, id: &str) -> ClientResult<DeleteResponse>;

    /// Executes a compiled search request
    async fn search(&self, index: &str, request: &SearchRequest) -> ClientResult<SearchResponse>;

    /// Deletes every document matching the query sub-structure
    async fn delete_by_query(&self, index: &str, query: &Value)
        -> ClientResult<DeleteByQueryResponse>;

    /// Creates an index with the given body (mappings/settings)
    async fn create_index(&self, index: &str, body: Value) -> ClientResult<()>;
}
