//! HTTP client utilities for the ShopHub storefront.
//!
//! Provides a small builder API over a pluggable [`Transport`], with JSON
//! and multipart bodies and whole-body responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use shophub_data::FetchClient;
//!
//! let client = FetchClient::new().with_base_url("http://127.0.0.1:8000/api");
//!
//! let page: serde_json::Value = client
//!     .get("/list-single-image/?page=1&limit=12")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

pub use error::FetchError;
pub use request::{Body, Method, MultipartForm, Part, PartContent, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

use std::sync::Arc;

/// Client for the storefront backend.
///
/// Relative paths resolve against the base URL; absolute URLs are sent as-is.
/// Clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    transport: Arc<dyn Transport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// A client over [`ReqwestTransport`].
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            transport,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn get(&self, url: &str) -> PendingRequest {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: &str) -> PendingRequest {
        self.request(Method::Post, url)
    }

    pub fn put(&self, url: &str) -> PendingRequest {
        self.request(Method::Put, url)
    }

    pub fn delete(&self, url: &str) -> PendingRequest {
        self.request(Method::Delete, url)
    }

    /// Join `url` onto the base URL with exactly one slash between them.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url.to_string(),
        }
    }

    pub fn request(&self, method: Method, url: &str) -> PendingRequest {
        PendingRequest {
            request: RequestBuilder::new(method, self.resolve(url)),
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request bound to the client's transport, sent with [`PendingRequest::send`].
#[must_use = "requests do nothing until sent"]
pub struct PendingRequest {
    request: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl PendingRequest {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.request = self.request.json(value)?;
        Ok(self)
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.request = self.request.multipart(form);
        self
    }

    /// Send and read the whole response. Non-2xx statuses are not errors here;
    /// see [`Response::error_for_status`].
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = self.request.method.as_str();
        let url = self.request.url.clone();
        tracing::debug!(method, url = %url, "sending request");

        match self.transport.send(self.request).await {
            Ok(response) => {
                tracing::debug!(method, url = %url, status = response.status, "response received");
                Ok(response)
            }
            Err(e) => {
                tracing::debug!(method, url = %url, error = %e, "request failed");
                Err(e)
            }
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, MultipartForm, Response};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records every request and answers with a fixed status.
    struct RecordingTransport {
        seen: Mutex<Vec<RequestBuilder>>,
        status: u16,
    }

    impl RecordingTransport {
        fn new(status: u16) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                status,
            })
        }
    }

    #[async_trait::async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::new(self.status, HashMap::new(), b"{}".to_vec()))
        }
    }

    #[test]
    fn test_resolve_joins_with_one_slash() {
        let client = FetchClient::with_transport(RecordingTransport::new(200))
            .with_base_url("http://127.0.0.1:8000/");
        assert_eq!(client.resolve("/api/list/"), "http://127.0.0.1:8000/api/list/");
        assert_eq!(client.resolve("auth/login/"), "http://127.0.0.1:8000/auth/login/");
        assert_eq!(client.resolve("https://cdn.example/x.png"), "https://cdn.example/x.png");
    }

    #[test]
    fn test_resolve_without_base_is_identity() {
        let client = FetchClient::with_transport(RecordingTransport::new(200));
        assert_eq!(client.resolve("/api/list/"), "/api/list/");
    }

    #[tokio::test]
    async fn test_send_goes_through_transport() {
        let transport = RecordingTransport::new(200);
        let client = FetchClient::with_transport(transport.clone()).with_base_url("http://shop");

        let resp = client
            .delete("/api/delete/3/")
            .header("Accept", "application/json")
            .send()
            .await
            .unwrap();
        assert!(resp.is_success());

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method(), Method::Delete);
        assert_eq!(seen[0].url(), "http://shop/api/delete/3/");
        assert_eq!(seen[0].header_value("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_send_hands_back_error_statuses() {
        let client = FetchClient::with_transport(RecordingTransport::new(500));
        let resp = client.get("http://shop/api/list/").send().await.unwrap();
        assert_eq!(resp.status, 500);
        assert_eq!(resp.error_for_status().unwrap_err().status(), Some(500));
    }
}
