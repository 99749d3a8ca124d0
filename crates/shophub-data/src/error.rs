//! Failures surfaced by the storefront HTTP client.

use thiserror::Error;

/// Why a request to the storefront backend did not yield usable data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never got an answer: refused connection, reset, DNS.
    #[error("network failure: {0}")]
    Network(String),

    /// The URL could not be turned into a request.
    #[error("bad request url: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status. `body` is a bounded excerpt.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected shape.
    #[error("unreadable response body: {0}")]
    Decode(String),

    /// A request body could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(String),
}

impl FetchError {
    /// The HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when no HTTP response was produced.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::InvalidUrl(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Encode(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_server_answers() {
        let err = FetchError::Status {
            status: 401,
            body: "bad credentials".into(),
        };
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "server returned 401: bad credentials");

        let err = FetchError::Network("connection refused".into());
        assert_eq!(err.status(), None);
        assert!(err.is_network());
    }

    #[test]
    fn test_serde_failure_is_encode() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(FetchError::from(bad), FetchError::Encode(_)));
    }
}
