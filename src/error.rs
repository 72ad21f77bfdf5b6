//! Error types for the earthquake feed client.

use thiserror::Error;

/// Errors surfaced by list fetches and configuration.
///
/// Detail fetches never return these; they degrade to `None` instead.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The HTTP call itself failed (DNS, connect, TLS, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response arrived but its status was not 2xx.
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The body was valid JSON but not the expected top-level shape.
    #[error("Invalid response: {0}")]
    Shape(String),

    /// The body was not valid JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FeedError {
    /// Returns the HTTP status code for [`FeedError::Status`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Returned when a recency window or magnitude floor label is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseSelectorError {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FeedError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_shape_error_is_distinct_from_status() {
        let err = FeedError::Shape("expected GeoJSON FeatureCollection".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid response: expected GeoJSON FeatureCollection"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_invalid_json_message() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = FeedError::from(json_err);
        assert!(err.to_string().starts_with("Invalid JSON response: "));
    }
}
