//! Remote collection access.
//!
//! This module provides the client seam between the list store and the two
//! upstream APIs (movie catalog and random-user generator), plus an in-memory
//! client for offline sessions and tests.

pub mod error;
pub mod http;
pub mod memory;
pub mod random_user;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::entity::{Entity, EntityId};
use crate::error::Result;
use crate::types::Resource;

pub use http::HttpCollectionClient;
pub use memory::MemoryClient;

/// Common interface for remote collection sources.
///
/// Every call is a single attempt. Retry is a caller-initiated re-invocation,
/// and failures carry a human-readable reason (`BoardError::reason`).
#[async_trait]
pub trait CollectionClient: Send + Sync {
    /// Fetch the raw payload for a collection, to be handed to the normalizer
    async fn fetch_all(&self, resource: Resource) -> Result<Value>;

    /// Create a record and return it as stored by the server
    async fn create(&self, resource: Resource, fields: &Map<String, Value>) -> Result<Entity>;

    /// Replace a record and return it as stored by the server
    async fn update(
        &self,
        resource: Resource,
        id: &EntityId,
        fields: &Map<String, Value>,
    ) -> Result<Entity>;

    /// Delete a record
    async fn remove(&self, resource: Resource, id: &EntityId) -> Result<()>;
}
