//! Generic repository over a search backend
//!
//! Orchestrates CRUD, bulk, search, pagination, and aggregation calls for
//! one entity type, invoking the entity's lifecycle hooks around backend
//! calls. All query compilation happens through [`QueryBuilder`]; the
//! repository itself adds no query semantics.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::errors::{RepositoryError, RepositoryResult};
use crate::client::{
    Bucket, BulkResponse, ClientError, DeleteByQueryResponse, DeleteResponse, IndexResponse,
    SearchBackend, SearchResponse, TotalHits, UpdateResponse,
};
use crate::entity::Entity;
use crate::query::QueryBuilder;

/// One page of results from [`Repository::paginate`]
#[derive(Debug, Clone)]
pub struct Page<E> {
    /// Entities on this page
    pub data: Vec<E>,
    /// Total matching documents
    pub total: u64,
    /// 1-based page number that was requested
    pub page: u64,
    /// Page size that was requested
    pub per_page: u64,
    /// Total page count for this query
    pub total_pages: u64,
}

/// Repository for one entity type
pub struct Repository<E: Entity> {
    backend: Arc<dyn SearchBackend>,
    index: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Repository<E> {
    /// Creates a repository bound to `E::index()` on the given backend
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            index: E::index().to_string(),
            _entity: PhantomData,
        }
    }

    /// Returns the backend index this repository targets
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Indexes one entity, running its create hooks around the call
    pub async fn create(&self, entity: &mut E) -> RepositoryResult<IndexResponse> {
        entity.before_create().await;
        let document = entity.to_document()?;
        let response = self.backend.index(&self.index, document).await?;
        entity.after_create().await;
        Ok(response)
    }

    /// Indexes many entities in one bulk call (no per-entity hooks)
    pub async fn create_many(&self, entities: &[E]) -> RepositoryResult<BulkResponse> {
        let mut documents = Vec::with_capacity(entities.len());
        for entity in entities {
            documents.push(entity.to_document()?);
        }
        Ok(self.backend.bulk(&self.index, documents).await?)
    }

    /// Fetches one entity by id; `None` when the document does not exist
    pub async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<E>> {
        let response = match self.backend.get(&self.index, id).await {
            Ok(response) => response,
            Err(ClientError::Backend { status: 404, .. }) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match response.source {
            Some(source) if response.found => Ok(Some(serde_json::from_value(source)?)),
            _ => Ok(None),
        }
    }

    /// Returns the first entity matching the query.
    ///
    /// Forces `limit(1)` onto the query before compiling it.
    pub async fn find_one(&self, query: QueryBuilder) -> RepositoryResult<Option<E>> {
        let request = query.limit(1).build()?;
        let response = self.backend.search(&self.index, &request).await?;
        match response
            .hits
            .hits
            .into_iter()
            .next()
            .and_then(|hit| hit.source)
        {
            Some(source) => Ok(Some(serde_json::from_value(source)?)),
            None => Ok(None),
        }
    }

    /// Returns every entity matching the query
    pub async fn find_many(&self, query: &QueryBuilder) -> RepositoryResult<Vec<E>> {
        let request = query.build()?;
        let response = self.backend.search(&self.index, &request).await?;
        response
            .hits
            .hits
            .into_iter()
            .filter_map(|hit| hit.source)
            .map(|source| serde_json::from_value(source).map_err(RepositoryError::from))
            .collect()
    }

    /// Applies a partial update.
    ///
    /// When an entity is supplied, its update hooks run around the call
    /// with the partial document as argument.
    pub async fn update(
        &self,
        id: &str,
        partial: Value,
        entity: Option<&E>,
    ) -> RepositoryResult<UpdateResponse> {
        if let Some(entity) = entity {
            entity.before_update(&partial).await;
        }
        let response = self
            .backend
            .update(&self.index, id, partial.clone(), false)
            .await?;
        if let Some(entity) = entity {
            entity.after_update(&partial).await;
        }
        Ok(response)
    }

    /// Applies a partial update, creating the document when absent
    pub async fn upsert(&self, id: &str, partial: Value) -> RepositoryResult<UpdateResponse> {
        Ok(self.backend.update(&self.index, id, partial, true).await?)
    }

    /// Deletes one document by id.
    ///
    /// When an entity is supplied, its delete hooks run around the call.
    pub async fn delete(
        &self,
        id: &str,
        entity: Option<&E>,
    ) -> RepositoryResult<DeleteResponse> {
        if let Some(entity) = entity {
            entity.before_delete().await;
        }
        let response = self.backend.delete(&self.index, id).await?;
        if let Some(entity) = entity {
            entity.after_delete().await;
        }
        Ok(response)
    }

    /// Deletes every document matching the query.
    ///
    /// Only the compiled `query` sub-structure is forwarded; sort,
    /// pagination, and aggregation state on the builder is ignored.
    pub async fn delete_by_query(
        &self,
        query: &QueryBuilder,
    ) -> RepositoryResult<DeleteByQueryResponse> {
        let request = query.build()?;
        Ok(self
            .backend
            .delete_by_query(&self.index, &request.query)
            .await?)
    }

    /// Fetches one page of results.
    ///
    /// `page` is 1-based; page 0 is treated as page 1.
    pub async fn paginate(
        &self,
        query: QueryBuilder,
        page: u64,
        per_page: u64,
    ) -> RepositoryResult<Page<E>> {
        let from = page.saturating_sub(1) * per_page;
        let request = query.limit(per_page).offset(from).build()?;
        let response = self.backend.search(&self.index, &request).await?;

        let total = response.hits.total.as_ref().map_or(0, TotalHits::value);
        let data = response
            .hits
            .hits
            .into_iter()
            .filter_map(|hit| hit.source)
            .map(|source| serde_json::from_value(source).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<E>>>()?;
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Ok(Page {
            data,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Executes the query and returns the raw backend response
    pub async fn search(&self, query: &QueryBuilder) -> RepositoryResult<SearchResponse> {
        let request = query.build()?;
        Ok(self.backend.search(&self.index, &request).await?)
    }

    /// Executes the query and returns the `group_by` buckets.
    ///
    /// Empty when the response carries no `group_by` aggregation.
    pub async fn group_by(&self, query: &QueryBuilder) -> RepositoryResult<Vec<Bucket>> {
        let response = self.search(query).await?;
        let buckets = response
            .aggregations
            .and_then(|mut aggregations| aggregations.remove("group_by"))
            .and_then(|mut group| {
                group
                    .as_object_mut()
                    .and_then(|group| group.remove("buckets"))
            })
            .map(serde_json::from_value::<Vec<Bucket>>)
            .transpose()?
            .unwrap_or_default();
        Ok(buckets)
    }

    /// Executes the query and returns the raw aggregations map
    pub async fn aggregations(
        &self,
        query: &QueryBuilder,
    ) -> RepositoryResult<Option<Map<String, Value>>> {
        Ok(self.search(query).await?.aggregations)
    }

    /// Creates the backend index from the entity's mapping and settings.
    ///
    /// An already-existing index is not an error.
    pub async fn ensure_index(&self) -> RepositoryResult<()> {
        let mut body = Map::new();
        if let Some(mappings) = E::mapping() {
            body.insert("mappings".to_string(), mappings);
        }
        if let Some(settings) = E::settings() {
            body.insert("settings".to_string(), settings);
        }
        match self
            .backend
            .create_index(&self.index, Value::Object(body))
            .await
        {
            Ok(()) => Ok(()),
            // The backend reports an existing index as a 400.
            Err(ClientError::Backend { status: 400, body })
                if body.contains("resource_already_exists") =>
            {
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
