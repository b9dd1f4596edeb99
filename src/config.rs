//! Top-level application configuration.
//!
//! Configuration is stored in `.finboard/config.yaml` and includes:
//! - Base URLs of the movie catalog and random-user APIs
//! - Page sizes per resource and the number of users to request
//! - Request timeout and default log filter

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::types::{DEFAULT_USER_COUNT, MOVIES_PAGE_SIZE, Resource, USERS_PAGE_SIZE, config_dir};

pub const DEFAULT_MOVIES_URL: &str = "https://mflix-movies.onrender.com";
pub const DEFAULT_USERS_URL: &str = "https://randomuser.me/api/";

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "endpoints.movies",
    "endpoints.users",
    "user_count",
    "page_size.movies",
    "page_size.users",
    "request_timeout",
    "log_level",
];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Number of users requested from the random-user API (default: 50)
    #[serde(default = "default_user_count")]
    pub user_count: usize,

    #[serde(default)]
    pub page_size: PageSizes,

    /// Remote request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Default log filter, overridden by FINBOARD_LOG
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_user_count() -> usize {
    DEFAULT_USER_COUNT
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            user_count: DEFAULT_USER_COUNT,
            page_size: PageSizes::default(),
            request_timeout: default_request_timeout(),
            log_level: None,
        }
    }
}

/// Base URLs for the two upstream APIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_movies_url")]
    pub movies: String,
    #[serde(default = "default_users_url")]
    pub users: String,
}

fn default_movies_url() -> String {
    DEFAULT_MOVIES_URL.to_string()
}

fn default_users_url() -> String {
    DEFAULT_USERS_URL.to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            movies: default_movies_url(),
            users: default_users_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizes {
    #[serde(default = "default_movies_page_size")]
    pub movies: usize,
    #[serde(default = "default_users_page_size")]
    pub users: usize,
}

fn default_movies_page_size() -> usize {
    MOVIES_PAGE_SIZE
}

fn default_users_page_size() -> usize {
    USERS_PAGE_SIZE
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            movies: MOVIES_PAGE_SIZE,
            users: USERS_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        config_dir().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.page_size.movies == 0 || self.page_size.users == 0 {
            return Err(BoardError::Config("page sizes must be at least 1".to_string()));
        }
        if self.request_timeout == 0 {
            return Err(BoardError::Config(
                "request_timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL for a resource, with environment override
    pub fn endpoint(&self, resource: Resource) -> String {
        let (var, configured) = match resource {
            Resource::Movies => ("FINBOARD_MOVIES_URL", &self.endpoints.movies),
            Resource::Users => ("FINBOARD_USERS_URL", &self.endpoints.users),
        };

        if let Ok(url) = env::var(var)
            && !url.is_empty()
        {
            return url;
        }

        configured.clone()
    }

    pub fn page_size(&self, resource: Resource) -> usize {
        match resource {
            Resource::Movies => self.page_size.movies,
            Resource::Users => self.page_size.users,
        }
    }

    /// Read a value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "endpoints.movies" => self.endpoints.movies.clone(),
            "endpoints.users" => self.endpoints.users.clone(),
            "user_count" => self.user_count.to_string(),
            "page_size.movies" => self.page_size.movies.to_string(),
            "page_size.users" => self.page_size.users.to_string(),
            "request_timeout" => self.request_timeout.to_string(),
            "log_level" => self.log_level.clone().unwrap_or_default(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a value by dotted key, validating numeric values
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "endpoints.movies" => self.endpoints.movies = parse_url(key, value)?,
            "endpoints.users" => self.endpoints.users = parse_url(key, value)?,
            "user_count" => self.user_count = parse_positive(key, value)?,
            "page_size.movies" => self.page_size.movies = parse_positive(key, value)?,
            "page_size.users" => self.page_size.users = parse_positive(key, value)?,
            "request_timeout" => self.request_timeout = parse_positive(key, value)? as u64,
            "log_level" => {
                self.log_level = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.trim().to_string())
                }
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> BoardError {
    BoardError::Config(format!(
        "unknown key '{}', expected one of: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(BoardError::Config(format!(
            "'{key}' must be a positive integer, got '{value}'"
        ))),
    }
}

fn parse_url(key: &str, value: &str) -> Result<String> {
    url::Url::parse(value.trim())
        .map(|_| value.trim().to_string())
        .map_err(|e| BoardError::Config(format!("'{key}' is not a valid URL: {e}")))
}
