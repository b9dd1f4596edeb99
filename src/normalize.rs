//! Conversion of heterogeneous API payloads into a canonical collection.
//!
//! Accepted shapes, in priority order:
//! 1. a bare array of records
//! 2. an object with a `data` array
//! 3. an object with a resource-specific array (`movies`, `results`, `users`)
//!
//! Anything else normalizes to an empty collection. A payload whose shape
//! drifted must degrade to "no data" rather than fail the load.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::entity::{Entity, EntityId};
use crate::remote::random_user::shape_user;
use crate::types::Resource;

/// Normalize a raw payload into an ordered, identity-unique collection
pub fn normalize(raw: Value, resource: Resource) -> Vec<Entity> {
    let Some(records) = extract_records(raw, resource) else {
        tracing::warn!(%resource, "unrecognized payload shape, treating as empty");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut entities = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let Value::Object(fields) = record else {
            tracing::warn!(%resource, index, "skipping non-object record");
            continue;
        };
        let entity = normalize_record(fields, resource, index);
        if !seen.insert(entity.id().clone()) {
            tracing::warn!(%resource, id = %entity.id(), "dropping duplicate identity key");
            continue;
        }
        entities.push(entity);
    }

    tracing::debug!(%resource, count = entities.len(), "normalized payload");
    entities
}

/// Normalize a single record, synthesizing an identity from its position when
/// the server did not provide one.
pub fn normalize_record(fields: Map<String, Value>, resource: Resource, index: usize) -> Entity {
    let fields = match resource {
        Resource::Users => shape_user(fields),
        Resource::Movies => fields,
    };

    let id = fields
        .get(resource.identity_field())
        .and_then(EntityId::from_value)
        .unwrap_or_else(|| EntityId::new(resource.synthetic_id(index)));

    Entity::new(resource, id, fields)
}

fn extract_records(raw: Value, resource: Resource) -> Option<Vec<Value>> {
    match raw {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("data") {
                return Some(items);
            }
            resource
                .collection_keys()
                .iter()
                .find_map(|key| match map.remove(*key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Value {
        json!([
            {"_id": "a", "title": "Alien", "year": 1979},
            {"_id": "b", "title": "Blade Runner", "year": 1982}
        ])
    }

    fn ids(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(|e| e.id().as_str()).collect()
    }

    #[test]
    fn test_bare_array() {
        let entities = normalize(records(), Resource::Movies);
        assert_eq!(ids(&entities), vec!["a", "b"]);
    }

    #[test]
    fn test_data_wrapper() {
        let entities = normalize(json!({"data": records()}), Resource::Movies);
        assert_eq!(ids(&entities), vec!["a", "b"]);
    }

    #[test]
    fn test_resource_key_wrapper() {
        let entities = normalize(json!({"movies": records()}), Resource::Movies);
        assert_eq!(ids(&entities), vec!["a", "b"]);
    }

    #[test]
    fn test_data_takes_priority_over_resource_key() {
        let payload = json!({
            "movies": [{"_id": "x", "title": "Wrong"}],
            "data": records()
        });
        let entities = normalize(payload, Resource::Movies);
        assert_eq!(ids(&entities), vec!["a", "b"]);
    }

    #[test]
    fn test_non_array_data_falls_through_to_resource_key() {
        let payload = json!({"data": {"count": 2}, "movies": records()});
        let entities = normalize(payload, Resource::Movies);
        assert_eq!(ids(&entities), vec!["a", "b"]);
    }

    #[test]
    fn test_unrecognized_shapes_are_empty() {
        assert!(normalize(json!({"items": records()}), Resource::Movies).is_empty());
        assert!(normalize(json!("oops"), Resource::Movies).is_empty());
        assert!(normalize(Value::Null, Resource::Movies).is_empty());
        assert!(normalize(json!({"movies": "not a list"}), Resource::Movies).is_empty());
    }

    #[test]
    fn test_skips_non_object_records() {
        let payload = json!([{"_id": "a"}, 7, "text", {"_id": "b"}]);
        let entities = normalize(payload, Resource::Movies);
        assert_eq!(ids(&entities), vec!["a", "b"]);
    }

    #[test]
    fn test_synthesizes_missing_ids_by_position() {
        let payload = json!([{"title": "One"}, {"_id": 42, "title": "Two"}, {"title": "Three"}]);
        let entities = normalize(payload, Resource::Movies);
        assert_eq!(ids(&entities), vec!["movie_0", "42", "movie_2"]);
        assert_eq!(entities[0].str_field("_id"), Some("movie_0"));
    }

    #[test]
    fn test_drops_duplicate_ids_keeping_first() {
        let payload = json!([
            {"_id": "a", "title": "First"},
            {"_id": "a", "title": "Second"},
            {"_id": "b", "title": "Third"}
        ]);
        let entities = normalize(payload, Resource::Movies);
        assert_eq!(ids(&entities), vec!["a", "b"]);
        assert_eq!(entities[0].str_field("title"), Some("First"));
    }

    #[test]
    fn test_users_results_are_shaped() {
        let payload = json!({
            "results": [
                {
                    "gender": "male",
                    "name": {"first": "Clint", "last": "Hoppe"},
                    "email": "c@example.com"
                },
                {
                    "gender": "female",
                    "name": {"first": "Esther", "last": "Kiehn"},
                    "email": "e@example.com"
                }
            ],
            "info": {"seed": "abc", "results": 2}
        });
        let entities = normalize(payload, Resource::Users);
        assert_eq!(ids(&entities), vec!["#USR1000", "#USR1001"]);
        assert_eq!(entities[1].str_field("name"), Some("Esther Kiehn"));
        assert_eq!(entities[1].str_field("gender"), Some("Female"));
    }

    #[test]
    fn test_three_shapes_normalize_identically() {
        let bare = normalize(records(), Resource::Movies);
        let data = normalize(json!({"data": records()}), Resource::Movies);
        let keyed = normalize(json!({"movies": records()}), Resource::Movies);
        assert_eq!(bare, data);
        assert_eq!(bare, keyed);
    }
}
