//! HTTP transport
//!
//! Speaks the Elasticsearch REST API over reqwest. The client is an
//! explicitly constructed handle; pass it (shared) into each repository
//! instead of relying on process-wide state.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::backend::SearchBackend;
use super::errors::{ClientError, ClientResult};
use super::response::{
    BulkResponse, DeleteByQueryResponse, DeleteResponse, GetResponse, IndexResponse,
    SearchResponse, UpdateResponse,
};
use crate::query::SearchRequest;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for an Elasticsearch-compatible backend
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a client for the given base URL with the default timeout
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

/// Renders the newline-delimited payload for a bulk index call
fn bulk_payload(index: &str, documents: &[Value]) -> ClientResult<String> {
    let mut payload = String::new();
    for document in documents {
        payload.push_str(&serde_json::to_string(&json!({"index": {"_index": index}}))?);
        payload.push('\n');
        payload.push_str(&serde_json::to_string(document)?);
        payload.push('\n');
    }
    Ok(payload)
}

#[async_trait]
impl SearchBackend for HttpClient {
    async fn index(&self, index: &str, document: Value) -> ClientResult<IndexResponse> {
        tracing::debug!(index, "indexing document");
        let response = self
            .http
            .post(self.url(&format!("{index}/_doc")))
            .json(&document)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn bulk(&self, index: &str, documents: Vec<Value>) -> ClientResult<BulkResponse> {
        tracing::debug!(index, count = documents.len(), "bulk indexing");
        let payload = bulk_payload(index, &documents)?;
        let response = self
            .http
            .post(self.url("_bulk?refresh=true"))
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get(&self, index: &str, id: &str) -> ClientResult<GetResponse> {
        tracing::debug!(index, id, "fetching document");
        let response = self
            .http
            .get(self.url(&format!("{index}/_doc/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update(
        &self,
        index: &str,
        id: &str,
        document: Value,
        upsert: bool,
    ) -> ClientResult<UpdateResponse> {
        tracing::debug!(index, id, upsert, "updating document");
        let mut body = json!({ "doc": document });
        if upsert {
            body["doc_as_upsert"] = Value::Bool(true);
        }
        let response = self
            .http
            .post(self.url(&format!("{index}/_update/{id}")))
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, index: &str, id: &str) -> ClientResult<DeleteResponse> {
        tracing::debug!(index, id, "deleting document");
        let response = self
            .http
            .delete(self.url(&format!("{index}/_doc/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn search(&self, index: &str, request: &SearchRequest) -> ClientResult<SearchResponse> {
        tracing::debug!(index, "executing search");
        let response = self
            .http
            .post(self.url(&format!("{index}/_search")))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_by_query(
        &self,
        index: &str,
        query: &Value,
    ) -> ClientResult<DeleteByQueryResponse> {
        tracing::debug!(index, "deleting by query");
        let response = self
            .http
            .post(self.url(&format!("{index}/_delete_by_query")))
            .json(&json!({ "query": query }))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_index(&self, index: &str, body: Value) -> ClientResult<()> {
        tracing::debug!(index, "creating index");
        let response = self.http.put(self.url(index)).json(&body).send().await?;
        Self::decode::<Value>(response).await?;
        Ok(())
    }
}
