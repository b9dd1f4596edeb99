use serde_json::json;

use crate::config::Config;
use crate::display::render_stats;
use crate::error::Result;
use crate::types::Resource;

use super::{CommandOutput, OutputOptions, SourceOptions, load_store, make_client};

/// Show summary counts for a collection
pub async fn cmd_stats(
    resource: Resource,
    source: SourceOptions,
    output: OutputOptions,
) -> Result<()> {
    let config = Config::load()?;
    let client = make_client(resource, &source, &config)?;
    let store = load_store(resource, client.as_ref(), &config).await?;
    let stats = store.stats();

    CommandOutput::new(json!({
        "resource": resource,
        "stats": stats,
    }))
    .with_text(format!("{}\n{}", resource, render_stats(&stats)))
    .print(output)
}
