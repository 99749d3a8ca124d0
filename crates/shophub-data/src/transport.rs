//! Pluggable request transport.

use async_trait::async_trait;

use crate::request::{Body, Method, MultipartForm, PartContent, RequestBuilder};
use crate::{FetchError, Response};

/// Sends a fully-built request and reads the whole response.
///
/// The client never retries, times out, or cancels a request on its own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default reqwest client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut outgoing = self.client.request(method, &request.url);
        for (key, value) in &request.headers {
            outgoing = outgoing.header(key.as_str(), value.as_str());
        }
        outgoing = match request.body {
            Some(Body::Json(bytes)) => outgoing.body(bytes),
            Some(Body::Multipart(form)) => outgoing.multipart(to_reqwest_form(form)?),
            None => outgoing,
        };

        let response = outgoing.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, FetchError> {
    let mut out = reqwest::multipart::Form::new();
    for part in form.into_parts() {
        out = match part.content {
            PartContent::Text(value) => out.text(part.name, value),
            PartContent::File {
                file_name,
                content_type,
                bytes,
            } => {
                let file = reqwest::multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)?;
                out.part(part.name, file)
            }
        };
    }
    Ok(out)
}
