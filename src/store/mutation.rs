//! Local add, edit and delete.
//!
//! Mutations only touch the store. Nothing here calls the remote client; a
//! reload replaces whatever was changed locally.

use serde_json::Map;

use crate::entity::{Entity, EntityId};
use crate::error::Result;

use super::ListStore;
use super::draft::{ApplyMode, Draft};
use super::filter::FilterContext;

impl ListStore {
    /// Create an entity from a draft and prepend it to the collection.
    ///
    /// A draft missing the required field is rejected before an id is minted,
    /// leaving the collection unchanged.
    pub fn add(&mut self, draft: &Draft) -> Result<EntityId> {
        self.add_at(draft, FilterContext::now())
    }

    pub fn add_at(&mut self, draft: &Draft, ctx: FilterContext) -> Result<EntityId> {
        draft.validate_new(self.resource)?;

        let collection = &self.collection;
        let id = self
            .ids
            .next(|candidate| collection.iter().any(|e| e.id() == candidate));

        let mut entity = Entity::new(self.resource, id.clone(), Map::new());
        draft.apply(
            self.resource,
            &mut entity,
            ApplyMode::Create {
                current_year: ctx.current_year,
            },
        );
        self.collection.insert(0, entity);

        tracing::debug!(resource = %self.resource, %id, "added entity");
        Ok(id)
    }

    /// Merge a draft over an existing entity, keeping its position.
    ///
    /// Returns `Ok(false)` when no entity has `id`. A merge that would leave
    /// the required field blank is rejected and the entity is left as it was.
    pub fn edit(&mut self, id: &EntityId, draft: &Draft) -> Result<bool> {
        let resource = self.resource;
        let Some(slot) = self.collection.iter_mut().find(|e| e.id() == id) else {
            tracing::warn!(%resource, %id, "edit of unknown entity ignored");
            return Ok(false);
        };

        let mut updated = slot.clone();
        draft.apply(resource, &mut updated, ApplyMode::Merge);
        Draft::validate_merged(&updated, resource)?;
        *slot = updated;

        tracing::debug!(%resource, %id, "edited entity");
        Ok(true)
    }

    /// Remove an entity and its selection key. Removing an absent id is a no-op;
    /// returns whether anything was removed.
    pub fn remove(&mut self, id: &EntityId) -> bool {
        let before = self.collection.len();
        self.collection.retain(|e| e.id() != id);
        self.selection.remove(id);

        let removed = self.collection.len() != before;
        if !removed {
            tracing::warn!(resource = %self.resource, %id, "remove of unknown entity ignored");
        }
        removed
    }

    /// Remove every selected entity in one pass and clear the selection.
    /// Returns the number of entities removed.
    pub fn bulk_remove(&mut self) -> usize {
        let before = self.collection.len();
        let selection = &self.selection;
        self.collection.retain(|e| !selection.contains(e.id()));
        self.selection.clear();

        let removed = before - self.collection.len();
        tracing::debug!(resource = %self.resource, removed, "bulk removed entities");
        removed
    }
}
