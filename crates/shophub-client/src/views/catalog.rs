//! Product listing with client-side filters and server-backed paging.

use std::sync::Arc;

use shophub_commerce::{
    apply_filters, Cart, Category, FilterState, Pagination, PriceRange, Product, ProductId,
};

use super::{Status, TOAST_TITLE_CHARS};
use crate::api::{CatalogPage, CatalogService};
use crate::config::CatalogConfig;
use crate::error::ApiError;
use crate::logging::{LogLevel, ViewLogger};
use crate::notify::Toasts;

/// Identifies one catalog fetch. Only the most recently issued ticket may
/// update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    page: u32,
}

impl FetchTicket {
    /// Page this fetch asked for.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// State of the product listing screen.
pub struct CatalogView {
    service: Arc<dyn CatalogService>,
    toasts: Toasts,
    logger: ViewLogger,
    products: Vec<Product>,
    filters: FilterState,
    pagination: Pagination,
    status: Status,
    latest_seq: u64,
}

impl CatalogView {
    pub fn new(service: Arc<dyn CatalogService>, toasts: Toasts, config: &CatalogConfig) -> Self {
        Self {
            service,
            toasts,
            logger: ViewLogger::new("catalog").with_route("/products"),
            products: Vec::new(),
            filters: FilterState::with_price_ceiling(config.price_ceiling),
            pagination: Pagination::new(1, config.page_size, 0),
            status: Status::Loading,
            latest_seq: 0,
        }
    }

    pub fn with_logger(mut self, logger: ViewLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Fetch the current page. Call when the screen becomes active.
    pub async fn load(&mut self) -> bool {
        self.fetch_page(self.pagination.page).await
    }

    /// Fetch `page` and apply the response. Returns whether it was applied.
    pub async fn fetch_page(&mut self, page: u32) -> bool {
        let ticket = self.begin_fetch(page);
        let result = self
            .service
            .fetch_page(ticket.page, self.pagination.per_page)
            .await;
        self.apply_response(ticket, result)
    }

    /// Issue a ticket for a fetch of `page`, superseding earlier tickets.
    ///
    /// Hosts that run fetches concurrently call this, perform the request
    /// through [`CatalogView::service`], then hand the result to
    /// [`CatalogView::apply_response`].
    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.latest_seq += 1;
        self.status = Status::Loading;
        FetchTicket {
            seq: self.latest_seq,
            page: page.max(1),
        }
    }

    /// Apply a fetch result unless a newer fetch has been issued since.
    ///
    /// On failure the current products stay in place.
    pub fn apply_response(
        &mut self,
        ticket: FetchTicket,
        result: Result<CatalogPage, ApiError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            self.logger
                .event(LogLevel::Debug, "discarding stale catalog response")
                .field("page", ticket.page)
                .field("ticket", ticket.seq)
                .field("latest", self.latest_seq)
                .emit();
            return false;
        }

        match result {
            Ok(page) => {
                self.pagination = Pagination::new(ticket.page, self.pagination.per_page, page.count);
                self.filters.page = self.pagination.page;
                self.products = page.products;
                self.status = Status::Ready;
                self.logger
                    .event(LogLevel::Debug, "catalog page loaded")
                    .field("page", self.pagination.page)
                    .field("products", self.products.len())
                    .field("count", page.count)
                    .emit();
            }
            Err(e) => {
                self.logger
                    .event(LogLevel::Error, "error fetching products")
                    .field("page", ticket.page)
                    .field("cause", e.to_string())
                    .field("network", e.is_network())
                    .emit();
                self.status = Status::Failed(e.to_string());
            }
        }
        true
    }

    /// Jump to page `n`, clamped into range, and fetch it. The current page
    /// only changes once the fetch succeeds; the page now showing is returned.
    pub async fn go_to_page(&mut self, n: u32) -> u32 {
        let target = self.pagination.clamp(n);
        self.fetch_page(target).await;
        self.pagination.page
    }

    /// Advance one page; no-op on the last page.
    pub async fn next_page(&mut self) -> bool {
        if !self.pagination.has_next() {
            return false;
        }
        self.go_to_page(self.pagination.page + 1).await;
        true
    }

    /// Go back one page; no-op on the first page.
    pub async fn prev_page(&mut self) -> bool {
        if !self.pagination.has_prev() {
            return false;
        }
        self.go_to_page(self.pagination.page - 1).await;
        true
    }

    /// Restore default filters. Refetches page 1 when another page was showing.
    pub async fn reset_filters(&mut self) {
        let previous_page = self.pagination.page;
        self.filters.reset();
        if previous_page != 1 {
            self.go_to_page(1).await;
        }
        self.filters.page = self.pagination.page;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filters.search = text.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.filters.category = category;
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.filters.price = PriceRange::new(min, max);
    }

    pub fn set_min_rating(&mut self, rating: f64) {
        self.filters.min_rating = rating;
    }

    /// Products on the current page that pass every filter.
    pub fn visible_products(&self) -> Vec<Product> {
        apply_filters(&self.products, &self.filters)
    }

    /// Number of products passing the filters ("N products found").
    pub fn result_count(&self) -> usize {
        self.visible_products().len()
    }

    /// Add a listed product to the cart and announce it.
    pub fn add_to_cart(&self, id: &ProductId, cart: &mut Cart) -> bool {
        let Some(product) = self.find(id) else {
            return false;
        };
        cart.add_item(product);
        self.toasts
            .show(format!("{} added to cart!", product.short_title(TOAST_TITLE_CHARS)));
        self.logger
            .event(LogLevel::Info, "added to cart")
            .field("product_id", id.as_str())
            .field("cart_items", cart.item_count())
            .emit();
        true
    }

    /// Announce the checkout redirect for a listed product.
    pub fn buy_now(&self, id: &ProductId) -> bool {
        let Some(product) = self.find(id) else {
            return false;
        };
        self.toasts.show(format!(
            "Redirecting to checkout for {}",
            product.short_title(TOAST_TITLE_CHARS)
        ));
        true
    }

    fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether the pager is rendered at all.
    pub fn shows_pagination(&self) -> bool {
        self.pagination.shows_controls()
    }

    /// Numbered page buttons.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pagination.page_numbers(self.pagination.total_pages as usize)
    }

    /// Service handle for hosts driving fetches through tickets.
    pub fn service(&self) -> Arc<dyn CatalogService> {
        Arc::clone(&self.service)
    }
}
