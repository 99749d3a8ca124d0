//! Whole-body responses from the backend.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Longest slice of an error body kept in [`FetchError::Status`].
const ERROR_EXCERPT_BYTES: usize = 200;

/// A response whose body has been read to the end.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8.
    pub fn text(&self) -> Result<&str, FetchError> {
        std::str::from_utf8(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Deserialize the JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Header lookup, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
    }

    /// Pass 2xx through; anything else becomes [`FetchError::Status`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::Status {
            status: self.status,
            body: excerpt(&self.body),
        })
    }
}

/// Lossy UTF-8 prefix of `body`, cut on a char boundary.
fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut end = text.len().min(ERROR_EXCERPT_BYTES);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].trim().to_string()
}
