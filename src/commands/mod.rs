mod config;
mod dashboard;
mod ls;
mod remote;
pub mod shell;
mod stats;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use dashboard::cmd_dashboard;
pub use ls::{ListOptions, cmd_ls};
pub use remote::{cmd_remote_create, cmd_remote_delete, cmd_remote_update};
pub use shell::cmd_shell;
pub use stats::cmd_stats;

use serde_json::Value;

pub use crate::cli::{OutputOptions, SourceOptions};
use crate::config::Config;
use crate::error::{BoardError, Result};
use crate::remote::{CollectionClient, HttpCollectionClient, MemoryClient};
use crate::store::{ListStore, RequestStatus};
use crate::types::Resource;

/// Print a JSON value to stdout
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Command result with a JSON form and an optional human-readable form
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when requested, otherwise the text form (falling back to JSON)
    pub fn print(self, output: OutputOptions) -> Result<()> {
        match (output.json, self.text) {
            (false, Some(text)) => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Client for a command: the JSON file when `--from-file` is given, else the API
pub fn make_client(
    resource: Resource,
    source: &SourceOptions,
    config: &Config,
) -> Result<Box<dyn CollectionClient>> {
    match &source.from_file {
        Some(path) => Ok(Box::new(MemoryClient::from_file(resource, path)?)),
        None => Ok(Box::new(HttpCollectionClient::from_config(config)?)),
    }
}

/// Build a store for `resource` and run its initial load.
///
/// A failed load is returned as an error so one-shot commands exit non-zero.
pub async fn load_store(
    resource: Resource,
    client: &dyn CollectionClient,
    config: &Config,
) -> Result<ListStore> {
    let mut store = ListStore::new(resource, config.page_size(resource));
    store.load(client).await;
    if let RequestStatus::Failed(reason) = store.status() {
        return Err(BoardError::Network(format!(
            "failed to load {resource}: {reason}"
        )));
    }
    Ok(store)
}
