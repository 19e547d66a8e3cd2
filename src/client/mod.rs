//! Backend client
//!
//! [`SearchBackend`] is the substitution seam the repository layer builds
//! on; [`HttpClient`] is its reqwest-based implementation.

mod backend;
mod errors;
mod http;
mod response;

pub use backend::SearchBackend;
pub use errors::{ClientError, ClientResult};
pub use http::HttpClient;
pub use response::{
    Bucket, BulkResponse, DeleteByQueryResponse, DeleteResponse, GetResponse, Hit, Hits,
    IndexResponse, SearchResponse, TotalHits, UpdateResponse,
};
