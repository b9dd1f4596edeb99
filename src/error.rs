use thiserror::Error;

use crate::types::Resource;

#[derive(Error, Debug)]
pub enum BoardError {
    /// Transport-level failure: unreachable host, timeout, broken connection
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("request failed ({status}): {reason}")]
    Response { status: u16, reason: String },

    /// A local add/edit was rejected before touching the collection
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("entity '{0}' not found")]
    NotFound(String),

    #[error("{0} collection is read-only on the remote API")]
    ReadOnly(Resource),

    #[error("unknown resource '{0}', expected 'movies' or 'users'")]
    InvalidResource(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl BoardError {
    /// Human-readable reason suitable for a `Failed(reason)` status.
    ///
    /// Unlike `Display`, this drops the category prefix for transport failures so
    /// the UI can show the server's own message.
    pub fn reason(&self) -> String {
        match self {
            BoardError::Network(reason) => reason.clone(),
            BoardError::Response { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for BoardError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => BoardError::Response {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            },
            None => BoardError::Network(crate::remote::error::transport_reason(&err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strips_prefix_for_transport_errors() {
        let err = BoardError::Response {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.reason(), "Service Unavailable");
        assert_eq!(err.to_string(), "request failed (503): Service Unavailable");

        let err = BoardError::Network("connection refused".to_string());
        assert_eq!(err.reason(), "connection refused");
    }

    #[test]
    fn test_reason_keeps_display_for_local_errors() {
        let err = BoardError::Validation("title is required".to_string());
        assert_eq!(err.reason(), "validation failed: title is required");
    }

    #[test]
    fn test_read_only_message() {
        assert_eq!(
            BoardError::ReadOnly(Resource::Users).to_string(),
            "users collection is read-only on the remote API"
        );
    }
}
