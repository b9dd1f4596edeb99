//! In-process collection client.
//!
//! Serves payloads held in memory (optionally seeded from a JSON file) through
//! the same contract as the HTTP client. Used for offline sessions
//! (`--from-file`) and in tests, where it can also be told to fail.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::entity::{Entity, EntityId};
use crate::error::{BoardError, Result};
use crate::normalize::{normalize, normalize_record};
use crate::types::Resource;

use super::CollectionClient;

#[derive(Debug, Default)]
struct MemoryState {
    payloads: HashMap<Resource, Value>,
    failure: Option<String>,
    fetch_count: usize,
    next_id: u64,
}

/// Collection client backed by in-memory payloads
#[derive(Debug, Default)]
pub struct MemoryClient {
    state: Mutex<MemoryState>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` (any shape the normalizer accepts) for `resource`
    pub fn with_payload(self, resource: Resource, payload: Value) -> Self {
        self.state.lock().payloads.insert(resource, payload);
        self
    }

    /// Load a payload for `resource` from a JSON file
    pub fn from_file(resource: Resource, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let payload: Value = serde_json::from_str(&content)?;
        Ok(Self::new().with_payload(resource, payload))
    }

    /// Make every subsequent call fail with a network error carrying `reason`
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.state.lock().failure = Some(reason.into());
    }

    /// Stop failing
    pub fn recover(&self) {
        self.state.lock().failure = None;
    }

    /// Replace the payload served for `resource`
    pub fn set_payload(&self, resource: Resource, payload: Value) {
        self.state.lock().payloads.insert(resource, payload);
    }

    /// Number of `fetch_all` calls served so far, including failed ones
    pub fn fetch_count(&self) -> usize {
        self.state.lock().fetch_count
    }

    fn check_failure(state: &MemoryState) -> Result<()> {
        match &state.failure {
            Some(reason) => Err(BoardError::Network(reason.clone())),
            None => Ok(()),
        }
    }

    /// Current records for a resource, normalized so writes can address them by id
    fn records(state: &MemoryState, resource: Resource) -> Vec<Entity> {
        state
            .payloads
            .get(&resource)
            .cloned()
            .map(|payload| normalize(payload, resource))
            .unwrap_or_default()
    }

    fn store_records(state: &mut MemoryState, resource: Resource, records: Vec<Entity>) {
        let values = records.iter().map(Entity::to_value).collect();
        state.payloads.insert(resource, Value::Array(values));
    }
}

#[async_trait]
impl CollectionClient for MemoryClient {
    async fn fetch_all(&self, resource: Resource) -> Result<Value> {
        let mut state = self.state.lock();
        state.fetch_count += 1;
        Self::check_failure(&state)?;
        Ok(state
            .payloads
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }

    async fn create(&self, resource: Resource, fields: &Map<String, Value>) -> Result<Entity> {
        let mut state = self.state.lock();
        Self::check_failure(&state)?;

        let mut records = Self::records(&state, resource);
        state.next_id += 1;
        let id = fields
            .get(resource.identity_field())
            .and_then(EntityId::from_value)
            .filter(|id| !id.is_temp())
            .unwrap_or_else(|| EntityId::new(format!("mem_{}", state.next_id)));
        if records.iter().any(|e| e.id() == &id) {
            return Err(BoardError::Response {
                status: 409,
                reason: format!("{resource} '{id}' already exists"),
            });
        }

        let entity = Entity::new(resource, id, fields.clone());
        records.insert(0, entity.clone());
        Self::store_records(&mut state, resource, records);
        Ok(entity)
    }

    async fn update(
        &self,
        resource: Resource,
        id: &EntityId,
        fields: &Map<String, Value>,
    ) -> Result<Entity> {
        let mut state = self.state.lock();
        Self::check_failure(&state)?;

        let mut records = Self::records(&state, resource);
        let slot = records
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
        *slot = normalize_record(fields.clone(), resource, 0);
        *slot = Entity::new(resource, id.clone(), slot.clone().into_fields());
        let updated = slot.clone();
        Self::store_records(&mut state, resource, records);
        Ok(updated)
    }

    async fn remove(&self, resource: Resource, id: &EntityId) -> Result<()> {
        let mut state = self.state.lock();
        Self::check_failure(&state)?;

        let mut records = Self::records(&state, resource);
        let before = records.len();
        records.retain(|e| e.id() != id);
        if records.len() == before {
            return Err(BoardError::NotFound(id.to_string()));
        }
        Self::store_records(&mut state, resource, records);
        Ok(())
    }
}
