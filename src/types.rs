use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::BoardError;

pub const CONFIG_DIR: &str = ".finboard";

/// Rows per page on the movies management page
pub const MOVIES_PAGE_SIZE: usize = 10;

/// Rows per page on the users page
pub const USERS_PAGE_SIZE: usize = 9;

/// Number of users requested from the random-user API
pub const DEFAULT_USER_COUNT: usize = 50;

/// Prefix for identity keys minted locally for unsaved entities
pub const TEMP_ID_PREFIX: &str = "temp_";

pub const VALID_RESOURCES: &[&str] = &["movies", "users"];

/// A named remote collection the dashboard manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Movies,
    Users,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::Movies => "movies",
            Resource::Users => "users",
        }
    }

    /// Field holding the identity key in records of this resource
    pub fn identity_field(self) -> &'static str {
        match self {
            Resource::Movies => "_id",
            Resource::Users => "id",
        }
    }

    /// Resource-specific payload keys that may wrap the record array,
    /// consulted after a bare array and a `data` wrapper.
    pub fn collection_keys(self) -> &'static [&'static str] {
        match self {
            Resource::Movies => &["movies", "results"],
            Resource::Users => &["results", "users"],
        }
    }

    /// Field that must be non-blank for a local add/edit to be accepted
    pub fn required_field(self) -> &'static str {
        match self {
            Resource::Movies => "title",
            Resource::Users => "name",
        }
    }

    /// Field shown as the row label and used for search
    pub fn label_field(self) -> &'static str {
        self.required_field()
    }

    /// Deterministic identity for a record that arrived without one
    pub fn synthetic_id(self, index: usize) -> String {
        match self {
            Resource::Movies => format!("movie_{index}"),
            Resource::Users => format!("#USR{}", 1000 + index),
        }
    }

    pub fn default_page_size(self) -> usize {
        match self {
            Resource::Movies => MOVIES_PAGE_SIZE,
            Resource::Users => USERS_PAGE_SIZE,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Resource {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movies" | "movie" => Ok(Resource::Movies),
            "users" | "user" => Ok(Resource::Users),
            _ => Err(BoardError::InvalidResource(s.to_string())),
        }
    }
}

/// Directory holding `config.yaml`, relative to the working directory
pub fn config_dir() -> PathBuf {
    PathBuf::from(CONFIG_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_from_str() {
        assert_eq!("movies".parse::<Resource>().unwrap(), Resource::Movies);
        assert_eq!("Users".parse::<Resource>().unwrap(), Resource::Users);
        assert_eq!(" movie ".parse::<Resource>().unwrap(), Resource::Movies);
        assert!("orders".parse::<Resource>().is_err());
    }

    #[test]
    fn test_resource_display() {
        assert_eq!(Resource::Movies.to_string(), "movies");
        assert_eq!(Resource::Users.to_string(), "users");
    }

    #[test]
    fn test_synthetic_ids() {
        assert_eq!(Resource::Users.synthetic_id(0), "#USR1000");
        assert_eq!(Resource::Users.synthetic_id(49), "#USR1049");
        assert_eq!(Resource::Movies.synthetic_id(3), "movie_3");
    }

    #[test]
    fn test_identity_fields() {
        assert_eq!(Resource::Movies.identity_field(), "_id");
        assert_eq!(Resource::Users.identity_field(), "id");
    }
}
