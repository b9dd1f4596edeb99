//! Direct writes against the movie catalog API.
//!
//! List pages never write remotely; these commands are the only path that
//! creates, replaces or deletes records on the server.

use serde_json::json;

use crate::config::Config;
use crate::display::render_entity;
use crate::entity::EntityId;
use crate::error::Result;
use crate::remote::{CollectionClient, HttpCollectionClient};
use crate::store::FilterContext;
use crate::store::draft::{ApplyMode, Draft};
use crate::types::Resource;

use super::{CommandOutput, OutputOptions};

const RESOURCE: Resource = Resource::Movies;

fn client() -> Result<HttpCollectionClient> {
    HttpCollectionClient::from_config(&Config::load()?)
}

/// Create a movie from `key=value` fields
pub async fn cmd_remote_create(fields: &[String], output: OutputOptions) -> Result<()> {
    let draft = Draft::parse_pairs(fields)?;
    draft.validate_new(RESOURCE)?;
    let body = draft.to_fields(
        RESOURCE,
        ApplyMode::Create {
            current_year: FilterContext::now().current_year,
        },
    );

    let created = client()?.create(RESOURCE, &body).await?;
    tracing::info!(id = %created.id(), "created movie");

    CommandOutput::new(json!({
        "action": "create",
        "id": created.id(),
        "record": created.to_value(),
    }))
    .with_text(format!("Created {}\n{}", created.id(), render_entity(&created)))
    .print(output)
}

/// Replace a movie's fields with `key=value` pairs
pub async fn cmd_remote_update(id: &str, fields: &[String], output: OutputOptions) -> Result<()> {
    let id = EntityId::new(id);
    let draft = Draft::parse_pairs(fields)?;
    let body = draft.to_fields(RESOURCE, ApplyMode::Merge);

    let updated = client()?.update(RESOURCE, &id, &body).await?;
    tracing::info!(%id, "updated movie");

    CommandOutput::new(json!({
        "action": "update",
        "id": updated.id(),
        "record": updated.to_value(),
    }))
    .with_text(format!("Updated {}\n{}", updated.id(), render_entity(&updated)))
    .print(output)
}

/// Delete a movie
pub async fn cmd_remote_delete(id: &str, output: OutputOptions) -> Result<()> {
    let id = EntityId::new(id);
    client()?.remove(RESOURCE, &id).await?;
    tracing::info!(%id, "deleted movie");

    CommandOutput::new(json!({
        "action": "delete",
        "id": id,
        "success": true,
    }))
    .with_text(format!("Deleted {id}"))
    .print(output)
}
