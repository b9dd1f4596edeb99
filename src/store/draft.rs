//! Form drafts for add and edit
//!
//! A draft is what a person typed: string values keyed by field name. Coercion
//! into typed entity fields happens when the draft is applied, with different
//! fallbacks for a new record (defaults) and an existing one (keep the old value).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::entity::{Entity, EntityId};
use crate::error::{BoardError, Result};
use crate::remote::random_user::capitalize;
use crate::types::Resource;

/// Movie fields holding comma-separated lists
const LIST_FIELDS: &[&str] = &["genres", "directors", "cast"];

/// How missing or unparsable numeric input is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Fill in defaults (current year, zero)
    Create { current_year: i64 },
    /// Keep whatever the entity already holds
    Merge,
}

/// String form fields for one entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    fields: BTreeMap<String, String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Parse `key=value` pairs. The value may contain `=`; later keys win.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut draft = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                BoardError::Validation(format!("expected key=value, got '{pair}'"))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(BoardError::Validation(format!(
                    "missing field name in '{pair}'"
                )));
            }
            draft.set(key, value.trim());
        }
        Ok(draft)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The draft as a `key=value` line that `split_args` reads back unchanged
    pub fn to_pairs_line(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| {
                if value.is_empty() || value.contains(char::is_whitespace) {
                    let quote = if value.contains('"') { '\'' } else { '"' };
                    format!("{key}={quote}{value}{quote}")
                } else {
                    format!("{key}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Prefill a draft from an entity, the way an edit form opens
    pub fn from_entity(entity: &Entity, resource: Resource) -> Self {
        let mut draft = Self::new();
        for (key, value) in entity.fields() {
            if key == resource.identity_field() {
                continue;
            }
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => continue,
            };
            draft.set(key.clone(), text);
        }
        if resource == Resource::Movies
            && let Some(rating) = entity.f64_field("imdb.rating")
        {
            draft.set("rating", rating.to_string());
        }
        draft
    }

    /// Reject a draft for a new entity whose required field is absent or blank
    pub fn validate_new(&self, resource: Resource) -> Result<()> {
        let required = resource.required_field();
        match self.get(required) {
            Some(value) if !value.trim().is_empty() => Ok(()),
            _ => Err(BoardError::Validation(format!("{required} is required"))),
        }
    }

    /// Write the draft into `entity`, coercing typed fields.
    ///
    /// The identity field is never written from a draft.
    pub fn apply(&self, resource: Resource, entity: &mut Entity, mode: ApplyMode) {
        for (key, raw) in &self.fields {
            if key == resource.identity_field() {
                tracing::debug!(%resource, "ignoring identity field in draft");
                continue;
            }
            match resource {
                Resource::Movies => apply_movie_field(entity, key, raw, mode),
                Resource::Users => apply_user_field(entity, key, raw),
            }
        }

        if let ApplyMode::Create { current_year } = mode
            && resource == Resource::Movies
        {
            fill_movie_defaults(entity, current_year);
        }
    }

    /// Coerced fields for a request body. The identity field is left out.
    pub fn to_fields(&self, resource: Resource, mode: ApplyMode) -> Map<String, Value> {
        let mut entity = Entity::new(resource, EntityId::new(""), Map::new());
        self.apply(resource, &mut entity, mode);
        let mut fields = entity.into_fields();
        fields.remove(resource.identity_field());
        fields
    }

    /// Check the required field on an entity after a draft was merged into it
    pub fn validate_merged(entity: &Entity, resource: Resource) -> Result<()> {
        let required = resource.required_field();
        match entity.str_field(required) {
            Some(value) if !value.trim().is_empty() => Ok(()),
            _ => Err(BoardError::Validation(format!("{required} is required"))),
        }
    }
}

fn apply_movie_field(entity: &mut Entity, key: &str, raw: &str, mode: ApplyMode) {
    match key {
        "year" => {
            if let Some(year) = parse_int(raw) {
                entity.set("year", Value::from(year));
            } else if let ApplyMode::Create { current_year } = mode {
                entity.set("year", Value::from(current_year));
            }
        }
        "runtime" => {
            if let Some(runtime) = parse_int(raw) {
                entity.set("runtime", Value::from(runtime));
            } else if matches!(mode, ApplyMode::Create { .. }) {
                entity.set("runtime", Value::from(0));
            }
        }
        "rating" | "imdb.rating" => {
            if let Some(rating) = parse_float(raw) {
                entity.set("imdb.rating", Value::from(rating));
            } else if matches!(mode, ApplyMode::Create { .. }) {
                entity.set("imdb.rating", Value::from(0.0));
            }
        }
        list if LIST_FIELDS.contains(&list) => {
            entity.set(list, split_list(raw));
        }
        other => entity.set(other, Value::String(raw.to_string())),
    }
}

fn apply_user_field(entity: &mut Entity, key: &str, raw: &str) {
    let value = match key {
        "gender" => capitalize(raw.trim()),
        _ => raw.to_string(),
    };
    entity.set(key, Value::String(value));
}

/// A new movie always carries the numeric and list fields the table reads
fn fill_movie_defaults(entity: &mut Entity, current_year: i64) {
    if entity.get("year").is_none() {
        entity.set("year", Value::from(current_year));
    }
    if entity.get("runtime").is_none() {
        entity.set("runtime", Value::from(0));
    }
    if entity.get("imdb.rating").is_none() {
        entity.set("imdb.rating", Value::from(0.0));
    }
    for list in LIST_FIELDS {
        if entity.get(list).is_none() {
            entity.set(list, Value::Array(Vec::new()));
        }
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn split_list(raw: &str) -> Value {
    Value::Array(
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::String(item.to_string()))
            .collect(),
    )
}
