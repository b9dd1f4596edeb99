use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::store::Tab;
use crate::types::{Resource, VALID_RESOURCES};

#[derive(Parser)]
#[command(name = "finboard")]
#[command(about = "Movies and users admin dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output flag
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Where list data comes from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceOptions {
    /// Read the collection from a JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show balance cards and the revenue series
    #[command(visible_alias = "d")]
    Dashboard {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// List one page of movies or users
    Ls {
        /// Resource: movies, users
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Filter tab (e.g. "High Rated", recent, female)
        #[arg(short, long, default_value = "all", value_parser = parse_tab)]
        tab: Tab,

        /// Page number (clamped to the last page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Fuzzy search query
        #[arg(short, long)]
        search: Option<String>,

        #[command(flatten)]
        source: SourceOptions,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show summary counts for a collection
    Stats {
        /// Resource: movies, users
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        #[command(flatten)]
        source: SourceOptions,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Interactive list session reading commands from stdin
    Shell {
        /// Resource: movies, users
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        #[command(flatten)]
        source: SourceOptions,
    },

    /// Write directly to the movie catalog API
    Remote {
        #[command(subcommand)]
        action: RemoteAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum RemoteAction {
    /// Create a movie from key=value fields
    Create {
        /// Fields, e.g. title="Heat" year=1995 genres="Crime, Drama"
        #[arg(required = true, value_name = "KEY=VALUE")]
        fields: Vec<String>,

        #[command(flatten)]
        output: OutputOptions,
    },
    /// Replace a movie's fields
    Update {
        /// Movie id
        id: String,

        #[arg(required = true, value_name = "KEY=VALUE")]
        fields: Vec<String>,

        #[command(flatten)]
        output: OutputOptions,
    },
    /// Delete a movie
    Delete {
        /// Movie id
        id: String,

        #[command(flatten)]
        output: OutputOptions,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (endpoints.movies, page_size.users, request_timeout, ...)
        key: String,
        /// Value to set
        value: String,

        #[command(flatten)]
        output: OutputOptions,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,

        #[command(flatten)]
        output: OutputOptions,
    },
}

fn parse_resource(s: &str) -> Result<Resource, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid resource. Must be one of: {}",
            VALID_RESOURCES.join(", ")
        )
    })
}

fn parse_tab(s: &str) -> Result<Tab, String> {
    s.parse()
}
