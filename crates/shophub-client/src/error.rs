//! Storefront API error types.

use shophub_data::FetchError;
use thiserror::Error;

/// Errors from calls to the storefront backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure or non-success HTTP status.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The backend answered 2xx with a body we cannot map.
    #[error("Malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },

    /// The form failed client-side validation; nothing was sent.
    #[error("Invalid form: {0}")]
    Validation(String),
}

impl ApiError {
    pub(crate) fn malformed(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        ApiError::Malformed {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Fetch(e) if e.is_network())
    }

    /// The non-success HTTP status, if the server answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Fetch(e) => e.status(),
            _ => None,
        }
    }
}
