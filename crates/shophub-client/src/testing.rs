//! In-memory fakes shared by the view tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use shophub_commerce::{Category, Currency, Money, Product, ProductId, Rating};
use shophub_data::FetchError;

use crate::api::{
    AdminItem, AdminService, AuthService, CatalogPage, CatalogService, Credentials, ProductDraft,
};
use crate::error::ApiError;
use crate::notify::Prompt;

pub(crate) fn network_error() -> ApiError {
    ApiError::Fetch(FetchError::Network("connection refused".into()))
}

pub(crate) fn status_error(status: u16) -> ApiError {
    ApiError::Fetch(FetchError::Status {
        status,
        body: String::new(),
    })
}

pub(crate) fn product(id: u64, title: &str, dollars: f64) -> Product {
    Product::new(
        ProductId::from(id),
        title,
        Money::from_decimal(dollars, Currency::USD),
    )
}

/// Records alerts; answers confirmations with a fixed value.
#[derive(Default)]
pub(crate) struct RecordingPrompt {
    pub alerts: Mutex<Vec<String>>,
    pub questions: Mutex<Vec<String>>,
    pub answer: bool,
}

impl RecordingPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Default::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Prompt for RecordingPrompt {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.questions.lock().unwrap().push(message.to_string());
        self.answer
    }
}

/// Catalog of `count` generated products served in pages.
pub(crate) struct FakeCatalog {
    pub count: u64,
    pub fail_pages: AtomicBool,
    pub product_failures: AtomicUsize,
    pub page_calls: Mutex<Vec<(u32, u32)>>,
    pub details: HashMap<ProductId, Product>,
}

impl FakeCatalog {
    pub fn with_count(count: u64) -> Self {
        Self {
            count,
            fail_pages: AtomicBool::new(false),
            product_failures: AtomicUsize::new(0),
            page_calls: Mutex::new(Vec::new()),
            details: HashMap::new(),
        }
    }

    pub fn with_detail(mut self, product: Product) -> Self {
        self.details.insert(product.id.clone(), product);
        self
    }

    pub fn page_calls(&self) -> Vec<(u32, u32)> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn page_of(&self, page: u32, page_size: u32) -> Vec<Product> {
        let start = u64::from(page.saturating_sub(1)) * u64::from(page_size);
        let end = (start + u64::from(page_size)).min(self.count);
        (start..end)
            .map(|i| {
                let id = i + 1;
                let category = if id % 2 == 0 {
                    Category::Electronics
                } else {
                    Category::Jewelery
                };
                product(id, &format!("Item {id}"), 10.0 * id as f64)
                    .with_description(format!("Description of item {id}"))
                    .with_category(category)
                    .with_rating(Rating::new((id % 5) as f64 + 0.5, 3))
            })
            .collect()
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<CatalogPage, ApiError> {
        self.page_calls.lock().unwrap().push((page, page_size));
        if self.fail_pages.load(Ordering::SeqCst) {
            return Err(network_error());
        }
        Ok(CatalogPage {
            products: self.page_of(page, page_size),
            count: self.count,
        })
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let remaining = self.product_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.product_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(network_error());
        }
        self.details.get(id).cloned().ok_or_else(|| status_error(404))
    }
}

/// Admin backend keeping items in memory.
#[derive(Default)]
pub(crate) struct FakeAdmin {
    pub items: Mutex<Vec<AdminItem>>,
    pub fail_list: AtomicBool,
    pub fail_writes: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeAdmin {
    pub fn with_items(items: Vec<AdminItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn write(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(status_error(500))
        } else {
            Ok(())
        }
    }
}

pub(crate) fn admin_item(id: u64, title: &str) -> AdminItem {
    AdminItem {
        id: ProductId::from(id),
        title: title.to_string(),
        description: format!("{title} description"),
        start_price: "20".to_string(),
        end_price: "15".to_string(),
        category: Some("electronics".to_string()),
        images: Vec::new(),
    }
}

#[async_trait]
impl AdminService for FakeAdmin {
    async fn list_items(&self) -> Result<Vec<AdminItem>, ApiError> {
        self.calls.lock().unwrap().push("list".to_string());
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(network_error());
        }
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create_item(&self, draft: &ProductDraft) -> Result<(), ApiError> {
        self.write(format!("create:{}", draft.title))?;
        let mut items = self.items.lock().unwrap();
        let id = items.len() as u64 + 100;
        items.push(AdminItem {
            id: ProductId::from(id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            start_price: draft.start_price.clone(),
            end_price: draft.end_price.clone(),
            category: Some(draft.category.clone()),
            images: Vec::new(),
        });
        Ok(())
    }

    async fn update_item(&self, id: &ProductId, draft: &ProductDraft) -> Result<(), ApiError> {
        self.write(format!("update:{id}"))?;
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items.iter_mut().find(|i| &i.id == id) {
            item.title = draft.title.clone();
        }
        Ok(())
    }

    async fn delete_item(&self, id: &ProductId) -> Result<(), ApiError> {
        self.write(format!("delete:{id}"))?;
        self.items.lock().unwrap().retain(|i| &i.id != id);
        Ok(())
    }
}

/// Auth backend with a scripted answer.
pub(crate) enum FakeAuth {
    Accept,
    Reject(u16),
    Unreachable,
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, _credentials: &Credentials) -> Result<(), ApiError> {
        match self {
            FakeAuth::Accept => Ok(()),
            FakeAuth::Reject(status) => Err(status_error(*status)),
            FakeAuth::Unreachable => Err(network_error()),
        }
    }
}
