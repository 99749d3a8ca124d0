//! Outgoing requests.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// Verbs the storefront backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Serialized JSON; `Content-Type` is set alongside it.
    Json(Vec<u8>),
    /// `multipart/form-data`; the transport picks the boundary.
    Multipart(MultipartForm),
}

/// Multipart fields in the order they will be sent.
///
/// Repeated names are allowed; the admin upload sends one `images` part per file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            content: PartContent::Text(value.into()),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(Part {
            name: name.into(),
            content: PartContent::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                bytes: bytes.into(),
            },
        });
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// First text field called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match &p.content {
            PartContent::Text(value) if p.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p.content, PartContent::File { .. }))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub content: PartContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartContent {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// A request ready to hand to a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Body>,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Serialize `value` as the body.
    pub fn json<T: Serialize>(self, value: &T) -> Result<Self, FetchError> {
        let encoded = serde_json::to_vec(value)?;
        let mut request = self.header("Content-Type", "application/json");
        request.body = Some(Body::Json(encoded));
        Ok(request)
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(Body::Multipart(form));
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Header lookup, ignoring ASCII case.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(key).then_some(v.as_str()))
    }

    pub fn body_ref(&self) -> Option<&Body> {
        self.body.as_ref()
    }
}
