//! Repository layer
//!
//! CRUD and search orchestration for one entity type over a
//! [`SearchBackend`](crate::client::SearchBackend).

mod errors;
mod repository;

pub use errors::{RepositoryError, RepositoryResult};
pub use repository::{Page, Repository};
