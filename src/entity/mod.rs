//! Entity abstraction
//!
//! An entity binds a Rust type to a backend index and optionally customizes
//! serialization and lifecycle behavior. All hooks default to no-ops, so an
//! implementation overrides only the ones it cares about.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A type stored as documents in one backend index.
///
/// ```
/// use elastiq::entity::Entity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Entity for User {
///     fn index() -> &'static str {
///         "users"
///     }
/// }
/// ```
#[async_trait]
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Name of the backend index holding documents of this type
    fn index() -> &'static str;

    /// Index mapping applied when the repository creates the index
    fn mapping() -> Option<Value> {
        None
    }

    /// Index settings applied when the repository creates the index
    fn settings() -> Option<Value> {
        None
    }

    /// Serializes the entity into its document form.
    ///
    /// Defaults to plain serde serialization; override for custom shapes.
    fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Runs before the entity is indexed
    async fn before_create(&mut self) {}

    /// Runs after the entity was indexed
    async fn after_create(&self) {}

    /// Runs before a partial update is sent
    async fn before_update(&self, _partial: &Value) {}

    /// Runs after a partial update was applied
    async fn after_update(&self, _partial: &Value) {}

    /// Runs before the entity's document is deleted
    async fn before_delete(&self) {}

    /// Runs after the entity's document was deleted
    async fn after_delete(&self) {}
}
