//! Storefront backend API.
//!
//! Each view talks to the backend through one of the service traits below,
//! so views can be driven by in-memory fakes. [`StorefrontApi`] implements
//! all three over a [`FetchClient`].

mod wire;

use std::path::Path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shophub_commerce::{Category, Currency, Money, Product, ProductId};
use shophub_data::{FetchClient, MultipartForm};

use crate::config::ApiConfig;
use crate::error::ApiError;
use wire::{AdminRow, DetailItem, ListPage};

/// One page of the catalog as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    /// Products on this page.
    pub products: Vec<Product>,
    /// Total number of products across all pages.
    pub count: u64,
}

/// An item as listed on the admin page.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminItem {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// Start price as the backend sent it.
    pub start_price: String,
    /// End price as the backend sent it.
    pub end_price: String,
    pub category: Option<String>,
    /// Absolute image URLs.
    pub images: Vec<String>,
}

impl AdminItem {
    /// "Price: start - end" label.
    pub fn price_label(&self) -> String {
        format!("{} - {}", self.start_price, self.end_price)
    }

    /// Category, or "N/A" when the item has none.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("N/A")
    }
}

/// A file chosen for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Create an upload from in-memory bytes, guessing the content type
    /// from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Admin form contents for a create or update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub start_price: String,
    pub end_price: String,
    pub category: String,
    pub files: Vec<UploadFile>,
}

impl ProductDraft {
    /// Form pre-filled from an existing item. Files start empty.
    pub fn from_item(item: &AdminItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            start_price: item.start_price.clone(),
            end_price: item.end_price.clone(),
            category: item.category.clone().unwrap_or_default(),
            files: Vec::new(),
        }
    }

    /// Check required fields and price syntax.
    pub fn validate(&self) -> Result<(), ApiError> {
        let required = [
            ("Title", &self.title),
            ("Description", &self.description),
            ("Start price", &self.start_price),
            ("End price", &self.end_price),
            ("Category", &self.category),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(ApiError::Validation(format!("{label} is required")));
            }
        }

        for (label, value) in [("Start price", &self.start_price), ("End price", &self.end_price)] {
            let parsed = Money::parse_decimal(value, Currency::default())
                .map_err(|_| ApiError::Validation(format!("{label} must be a number")))?;
            if parsed.is_negative() {
                return Err(ApiError::Validation(format!("{label} must not be negative")));
            }
        }

        match self.category.parse::<Category>() {
            Ok(category) if !category.is_all() => Ok(()),
            _ => Err(ApiError::Validation(format!(
                "Category {:?} is not one of the storefront categories",
                self.category.trim()
            ))),
        }
    }

    /// Multipart payload: scalar fields first, then one `images` part per file.
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", self.title.trim())
            .text("description", self.description.trim())
            .text("startPrice", self.start_price.trim())
            .text("endPrice", self.end_price.trim())
            .text("category", self.category.trim());
        for file in &self.files {
            form = form.file(
                "images",
                file.file_name.clone(),
                file.content_type.clone(),
                file.bytes.clone(),
            );
        }
        form
    }
}

/// Email/password login body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch one page of the listing.
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<CatalogPage, ApiError>;

    /// Fetch a single product with its full image gallery.
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, ApiError>;
}

/// Product management for the admin upload page.
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn list_items(&self) -> Result<Vec<AdminItem>, ApiError>;
    async fn create_item(&self, draft: &ProductDraft) -> Result<(), ApiError>;
    async fn update_item(&self, id: &ProductId, draft: &ProductDraft) -> Result<(), ApiError>;
    async fn delete_item(&self, id: &ProductId) -> Result<(), ApiError>;
}

/// Credential login.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Ok on a 2xx answer.
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError>;
}

/// HTTP implementation of the storefront services.
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: FetchClient,
    base_url: String,
    api_prefix: String,
    currency: Currency,
}

impl StorefrontApi {
    /// Create an API handle using the reqwest transport.
    pub fn new(config: &ApiConfig, currency: Currency) -> Self {
        Self::with_client(FetchClient::new(), config, currency)
    }

    /// Create an API handle over an existing client. The client's base URL
    /// is replaced by the configured one.
    pub fn with_client(client: FetchClient, config: &ApiConfig, currency: Currency) -> Self {
        Self {
            client: client.with_base_url(config.base_url.clone()),
            base_url: config.base_url.clone(),
            api_prefix: config.api_prefix.clone(),
            currency,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_prefix.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self.client.get(endpoint).send().await?.error_for_status()?;
        response.json().map_err(|e| ApiError::malformed(endpoint, e))
    }
}

#[async_trait]
impl CatalogService for StorefrontApi {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<CatalogPage, ApiError> {
        let endpoint = self.endpoint(&format!("list-single-image/?page={page}&limit={page_size}"));
        let listing: ListPage = self.get_json(&endpoint).await?;

        let products = listing
            .results
            .into_iter()
            .map(|item| item.into_product(&self.base_url, self.currency))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::malformed(&endpoint, e))?;

        Ok(CatalogPage {
            products,
            count: listing.count,
        })
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let endpoint = self.endpoint(&format!("items/{id}/"));
        let item: DetailItem = self.get_json(&endpoint).await?;
        item.into_product(&self.base_url, self.currency)
            .map_err(|e| ApiError::malformed(&endpoint, e))
    }
}

#[async_trait]
impl AdminService for StorefrontApi {
    async fn list_items(&self) -> Result<Vec<AdminItem>, ApiError> {
        let rows: Vec<AdminRow> = self.get_json(&self.endpoint("list/")).await?;
        Ok(rows.into_iter().map(|row| row.into_item(&self.base_url)).collect())
    }

    async fn create_item(&self, draft: &ProductDraft) -> Result<(), ApiError> {
        self.client
            .post(&self.endpoint("create/"))
            .multipart(draft.to_form())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_item(&self, id: &ProductId, draft: &ProductDraft) -> Result<(), ApiError> {
        self.client
            .put(&self.endpoint(&format!("update/{id}/")))
            .multipart(draft.to_form())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_item(&self, id: &ProductId) -> Result<(), ApiError> {
        self.client
            .delete(&self.endpoint(&format!("delete/{id}/")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl AuthService for StorefrontApi {
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.client
            .post("/auth/login/")
            .json(credentials)?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
