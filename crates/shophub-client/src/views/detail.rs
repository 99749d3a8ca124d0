//! Single product page: gallery, quantity stepper, wishlist.

use std::sync::Arc;

use shophub_commerce::{step_quantity, Cart, Product, ProductId};

use super::{LoadState, TOAST_TITLE_CHARS};
use crate::api::CatalogService;
use crate::logging::{LogLevel, ViewLogger};
use crate::notify::Toasts;

pub struct ProductDetailView {
    service: Arc<dyn CatalogService>,
    toasts: Toasts,
    logger: ViewLogger,
    id: ProductId,
    state: LoadState<Product>,
    selected_image: usize,
    quantity: u32,
    wishlisted: bool,
}

impl ProductDetailView {
    pub fn new(service: Arc<dyn CatalogService>, toasts: Toasts, id: ProductId) -> Self {
        let route = format!("/products/{id}");
        Self {
            service,
            toasts,
            logger: ViewLogger::new("product_detail").with_route(route),
            id,
            state: LoadState::Loading,
            selected_image: 0,
            quantity: 1,
            wishlisted: false,
        }
    }

    pub fn with_logger(mut self, logger: ViewLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Fetch the product. The view shows nothing stale while this runs.
    pub async fn load(&mut self) -> bool {
        self.state = LoadState::Loading;
        match self.service.fetch_product(&self.id).await {
            Ok(product) => {
                self.selected_image = 0;
                self.state = LoadState::Ready(product);
                true
            }
            Err(e) => {
                self.logger
                    .event(LogLevel::Error, "error fetching product")
                    .field("product_id", self.id.as_str())
                    .field("cause", e.to_string())
                    .emit();
                self.state = LoadState::Failed(e.to_string());
                false
            }
        }
    }

    /// Load again after a failure.
    pub async fn retry(&mut self) -> bool {
        self.load().await
    }

    /// Select a gallery image. Out-of-range indices are ignored.
    pub fn select_image(&mut self, index: usize) -> bool {
        let in_range = self
            .product()
            .is_some_and(|p| index < p.images.len());
        if in_range {
            self.selected_image = index;
        }
        in_range
    }

    pub fn selected_image(&self) -> usize {
        self.selected_image
    }

    /// URL of the selected image.
    pub fn active_image(&self) -> Option<&str> {
        self.product()?.image(self.selected_image)
    }

    /// Step the quantity; it never drops below 1.
    pub fn change_quantity(&mut self, delta: i64) -> u32 {
        self.quantity = step_quantity(self.quantity, delta);
        self.quantity
    }

    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn toggle_wishlist(&mut self) -> bool {
        self.wishlisted = !self.wishlisted;
        self.wishlisted
    }

    pub fn is_wishlisted(&self) -> bool {
        self.wishlisted
    }

    /// Add the chosen quantity to the cart. No-op until the product is loaded.
    pub fn add_to_cart(&self, cart: &mut Cart) -> bool {
        let Some(product) = self.product() else {
            return false;
        };
        cart.add_units(product, self.quantity);
        self.toasts
            .show(format!("{} added to cart!", product.short_title(TOAST_TITLE_CHARS)));
        self.logger
            .event(LogLevel::Info, "added to cart")
            .field("product_id", self.id.as_str())
            .field("quantity", self.quantity)
            .emit();
        true
    }

    pub fn product(&self) -> Option<&Product> {
        self.state.value()
    }

    pub fn state(&self) -> &LoadState<Product> {
        &self.state
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product, FakeCatalog};
    use std::sync::atomic::Ordering;

    fn jacket() -> Product {
        product(9, "Rain Jacket", 45.0)
            .with_image("http://h/a.jpg")
            .with_image("http://h/b.jpg")
    }

    fn view(catalog: FakeCatalog) -> ProductDetailView {
        ProductDetailView::new(Arc::new(catalog), Toasts::default(), ProductId::from(9u64))
    }

    #[tokio::test]
    async fn test_load_and_gallery() {
        let mut view = view(FakeCatalog::with_count(0).with_detail(jacket()));
        assert!(view.state().is_loading());
        assert_eq!(view.active_image(), None);

        assert!(view.load().await);
        assert_eq!(view.active_image(), Some("http://h/a.jpg"));

        assert!(view.select_image(1));
        assert_eq!(view.active_image(), Some("http://h/b.jpg"));

        assert!(!view.select_image(2));
        assert_eq!(view.selected_image(), 1);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let catalog = FakeCatalog::with_count(0).with_detail(jacket());
        catalog.product_failures.store(1, Ordering::SeqCst);
        let mut view = view(catalog);

        assert!(!view.load().await);
        assert!(view.state().error().is_some());
        assert!(view.product().is_none());

        assert!(view.retry().await);
        assert_eq!(view.product().map(|p| p.title.as_str()), Some("Rain Jacket"));
    }

    #[tokio::test]
    async fn test_missing_product_is_failed_state() {
        let mut view = view(FakeCatalog::with_count(0));
        assert!(!view.load().await);
        assert!(matches!(view.state(), LoadState::Failed(_)));
    }

    #[tokio::test]
    async fn test_quantity_and_cart() {
        let mut view = view(FakeCatalog::with_count(0).with_detail(jacket()));
        let mut cart = Cart::default();
        assert!(!view.add_to_cart(&mut cart));

        view.load().await;
        assert!(!view.can_decrement());
        assert_eq!(view.change_quantity(-5), 1);
        assert_eq!(view.change_quantity(2), 3);
        assert!(view.can_decrement());

        assert!(view.add_to_cart(&mut cart));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_wishlist_toggle() {
        let mut view = view(FakeCatalog::with_count(0));
        assert!(view.toggle_wishlist());
        assert!(view.is_wishlisted());
        assert!(!view.toggle_wishlist());
    }

    #[test]
    fn test_select_before_load_is_ignored() {
        let mut view = view(FakeCatalog::with_count(0));
        assert!(!view.select_image(0));
    }
}
