//! Schema-free records with a designated identity key.
//!
//! Movies and users share one representation: a JSON object plus the identity
//! key pulled out of it. Consumers read optional nested fields through dotted
//! paths (`imdb.rating`, `location.city`) and get `None` for anything missing or
//! mistyped.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{Resource, TEMP_ID_PREFIX};

/// Identity key of an entity, unique within a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Key for an entity created locally and never saved remotely
    pub fn temp(millis: i64) -> Self {
        Self(format!("{TEMP_ID_PREFIX}{millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_temp(&self) -> bool {
        self.0.starts_with(TEMP_ID_PREFIX)
    }

    /// Read a server-provided id. Strings and numbers qualify; anything else
    /// (null, the random-user `{name, value}` object) does not.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One record in a collection (a user or a movie)
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    fields: Map<String, Value>,
}

impl Entity {
    /// Build an entity, writing the identity key into its identity field so the
    /// record serializes back to the server shape.
    pub fn new(resource: Resource, id: EntityId, mut fields: Map<String, Value>) -> Self {
        fields.insert(
            resource.identity_field().to_string(),
            Value::String(id.as_str().to_string()),
        );
        Self { id, fields }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Look up a dotted path such as `imdb.rating`
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.fields.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn str_field(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Integer value, accepting numeric strings as the catalog API sometimes
    /// returns them (`"year": "1994"`).
    pub fn i64_field(&self, path: &str) -> Option<i64> {
        match self.get(path)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn f64_field(&self, path: &str) -> Option<f64> {
        match self.get(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// String items of an array field; non-string items are skipped
    pub fn str_list(&self, path: &str) -> Vec<&str> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Write a value at a dotted path, creating intermediate objects and
    /// replacing non-object intermediates.
    pub fn set(&mut self, path: &str, value: Value) {
        set_path(&mut self.fields, path, value);
    }
}

fn set_path(fields: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            fields.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let slot = fields
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(inner) = slot {
                set_path(inner, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie(value: Value) -> Entity {
        let fields = value.as_object().cloned().unwrap();
        Entity::new(Resource::Movies, EntityId::new("m1"), fields)
    }

    #[test]
    fn test_new_writes_identity_field() {
        let entity = movie(json!({"title": "Heat"}));
        assert_eq!(entity.str_field("_id"), Some("m1"));
        assert_eq!(entity.id().as_str(), "m1");
    }

    #[test]
    fn test_nested_lookup() {
        let entity = movie(json!({"imdb": {"rating": 8.3}}));
        assert_eq!(entity.f64_field("imdb.rating"), Some(8.3));
        assert_eq!(entity.f64_field("imdb.votes"), None);
        assert_eq!(entity.f64_field("imdb.rating.value"), None);
    }

    #[test]
    fn test_missing_nested_parent_reads_none() {
        let entity = movie(json!({"title": "No Rating"}));
        assert!(entity.get("imdb.rating").is_none());
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let entity = movie(json!({"year": "1994", "runtime": 142.0}));
        assert_eq!(entity.i64_field("year"), Some(1994));
        assert_eq!(entity.i64_field("runtime"), Some(142));
    }

    #[test]
    fn test_str_list_skips_non_strings() {
        let entity = movie(json!({"genres": ["Drama", 3, null, "Crime"]}));
        assert_eq!(entity.str_list("genres"), vec!["Drama", "Crime"]);
        assert!(entity.str_list("cast").is_empty());
    }

    #[test]
    fn test_set_creates_nested_objects() {
        let mut entity = movie(json!({"imdb": 7}));
        entity.set("imdb.rating", json!(9.1));
        assert_eq!(entity.f64_field("imdb.rating"), Some(9.1));
        entity.set("title", json!("Updated"));
        assert_eq!(entity.str_field("title"), Some("Updated"));
    }

    #[test]
    fn test_entity_id_from_value() {
        assert_eq!(
            EntityId::from_value(&json!("abc")),
            Some(EntityId::new("abc"))
        );
        assert_eq!(EntityId::from_value(&json!(42)), Some(EntityId::new("42")));
        assert_eq!(EntityId::from_value(&json!("  ")), None);
        assert_eq!(EntityId::from_value(&json!({"name": "", "value": null})), None);
    }

    #[test]
    fn test_temp_ids() {
        let id = EntityId::temp(1_700_000_000_000);
        assert_eq!(id.as_str(), "temp_1700000000000");
        assert!(id.is_temp());
        assert!(!EntityId::new("573a1390f29313caabcd4135").is_temp());
    }
}
