//! Shared error handling for remote collection clients.
//!
//! Transport failures and non-success responses both end up as a reason string
//! on the store's `Failed` status, so the work here is mostly picking the most
//! useful human-readable message out of what the server or transport gave us.

use std::error::Error as _;
use std::fmt;

use serde_json::Value;

use crate::error::BoardError;

/// A non-success response from an upstream API.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code
    pub status: reqwest::StatusCode,
    /// Human-readable error message
    pub message: String,
    /// API name for context (e.g., "movies", "users")
    pub source_name: &'static str,
}

impl ApiError {
    /// Build an error from a response status and its (possibly empty) body.
    ///
    /// Prefers a JSON `message` or `error` field, then a short plain-text body,
    /// then the status' canonical reason.
    pub fn from_body(status: reqwest::StatusCode, body: &str, source_name: &'static str) -> Self {
        Self {
            status,
            message: reason_from_body(status, body),
            source_name,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == reqwest::StatusCode::NOT_FOUND
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} API: {}", self.source_name, self.message)
    }
}

impl From<ApiError> for BoardError {
    fn from(error: ApiError) -> Self {
        BoardError::Response {
            status: error.status.as_u16(),
            reason: error.to_string(),
        }
    }
}

/// Longest plain-text body used verbatim as a reason
const MAX_TEXT_REASON: usize = 200;

fn reason_from_body(status: reqwest::StatusCode, body: &str) -> String {
    let trimmed = body.trim();

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["message", "error", "detail"] {
            if let Some(Value::String(msg)) = map.get(key)
                && !msg.trim().is_empty()
            {
                return msg.trim().to_string();
            }
        }
    } else if !trimmed.is_empty()
        && trimmed.len() <= MAX_TEXT_REASON
        && !trimmed.starts_with('<')
    {
        return trimmed.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

/// Describe a transport-level reqwest failure (no response received).
pub fn transport_reason(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "could not connect"
    } else if err.is_decode() {
        "invalid response body"
    } else if err.is_builder() {
        "invalid request"
    } else {
        "request failed"
    };

    // reqwest's own Display repeats the URL; the innermost cause is usually
    // the actionable part ("Connection refused", "dns error").
    let mut cause: Option<&dyn std::error::Error> = err.source();
    let mut innermost = None;
    while let Some(c) = cause {
        innermost = Some(c.to_string());
        cause = c.source();
    }

    match (innermost, err.url()) {
        (Some(detail), Some(url)) => format!("{kind}: {detail} ({url})"),
        (Some(detail), None) => format!("{kind}: {detail}"),
        (None, Some(url)) => format!("{kind} ({url})"),
        (None, None) => kind.to_string(),
    }
}
