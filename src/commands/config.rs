//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Set a value and save

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions};
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;
use crate::types::Resource;

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;

    let json_output = json!({
        "endpoints": {
            "movies": config.endpoint(Resource::Movies),
            "users": config.endpoint(Resource::Users),
        },
        "user_count": config.user_count,
        "page_size": {
            "movies": config.page_size.movies,
            "users": config.page_size.users,
        },
        "request_timeout": config.request_timeout,
        "log_level": config.log_level,
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = format!("{}\n\n", "Configuration:".cyan().bold());
    for key in CONFIG_KEYS {
        let value = match *key {
            "endpoints.movies" => config.endpoint(Resource::Movies),
            "endpoints.users" => config.endpoint(Resource::Users),
            other => config.get(other)?,
        };
        let value = if value.is_empty() {
            "(not set)".dimmed().to_string()
        } else {
            value
        };
        text_output.push_str(&format!("  {}: {}\n", key.cyan(), value));
    }
    text_output.push('\n');
    text_output.push_str(
        &format!("Config file: {}", Config::config_path().display())
            .dimmed()
            .to_string(),
    );

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let stored = config.get(key)?;
    tracing::debug!(key, value = %stored, "config updated");

    CommandOutput::new(json!({
        "action": "set",
        "key": key,
        "value": stored,
        "success": true,
    }))
    .with_text(format!("Set {} = {}", key.cyan(), stored))
    .print(output)
}

/// Get a configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value)
    .print(output)
}
