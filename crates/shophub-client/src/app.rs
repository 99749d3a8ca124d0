//! Storefront session: configuration, services, cart and toasts.

use std::sync::Arc;

use shophub_commerce::{Cart, CartTotals, CommerceError, ProductId};

use crate::api::{AdminService, AuthService, CatalogService, StorefrontApi};
use crate::config::StorefrontConfig;
use crate::logging::ViewLogger;
use crate::notify::{Prompt, Toasts};
use crate::views::{AdminView, CatalogView, LoginView, ProductDetailView};

/// Backend services the views talk to.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogService>,
    pub admin: Arc<dyn AdminService>,
    pub auth: Arc<dyn AuthService>,
}

impl Services {
    /// All three services backed by one HTTP API handle.
    pub fn http(api: StorefrontApi) -> Self {
        let api = Arc::new(api);
        Self {
            catalog: api.clone(),
            admin: api.clone(),
            auth: api,
        }
    }
}

/// One user session of the storefront.
pub struct Storefront {
    config: StorefrontConfig,
    services: Services,
    prompt: Arc<dyn Prompt>,
    cart: Cart,
    toasts: Toasts,
}

impl Storefront {
    /// Session talking to the configured backend over HTTP.
    pub fn new(config: StorefrontConfig, prompt: Arc<dyn Prompt>) -> Self {
        let api = StorefrontApi::new(&config.api, config.catalog.currency);
        Self::with_services(config, Services::http(api), prompt)
    }

    pub fn with_services(
        config: StorefrontConfig,
        services: Services,
        prompt: Arc<dyn Prompt>,
    ) -> Self {
        let cart = Cart::new(config.catalog.currency).with_tax_rate(config.cart.tax_rate());
        let toasts = Toasts::new(config.notifications.toast_lifetime());
        tracing::debug!(
            base_url = %config.api.base_url,
            page_size = config.catalog.page_size,
            "storefront session created"
        );
        Self {
            config,
            services,
            prompt,
            cart,
            toasts,
        }
    }

    fn logger(&self, view: &'static str, route: String) -> ViewLogger {
        ViewLogger::new(view)
            .with_route(route)
            .with_min_level(self.config.logging.level)
    }

    /// Product listing.
    pub fn catalog(&self) -> CatalogView {
        CatalogView::new(
            Arc::clone(&self.services.catalog),
            self.toasts.clone(),
            &self.config.catalog,
        )
        .with_logger(self.logger("catalog", "/products".to_string()))
    }

    /// Single product page.
    pub fn product_detail(&self, id: impl Into<ProductId>) -> ProductDetailView {
        let id = id.into();
        let route = format!("/products/{id}");
        ProductDetailView::new(Arc::clone(&self.services.catalog), self.toasts.clone(), id)
            .with_logger(self.logger("product_detail", route))
    }

    /// Admin upload page.
    pub fn admin(&self) -> AdminView {
        AdminView::new(Arc::clone(&self.services.admin), Arc::clone(&self.prompt))
            .with_logger(self.logger("admin", "/productUpload".to_string()))
    }

    /// Login page.
    pub fn login(&self) -> LoginView {
        LoginView::new(
            Arc::clone(&self.services.auth),
            Arc::clone(&self.prompt),
            self.config.api.oauth_login_url(),
        )
        .with_logger(self.logger("login", "/login".to_string()))
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Subtotal, tax and total of the session cart.
    pub fn cart_totals(&self) -> Result<CartTotals, CommerceError> {
        self.cart.totals()
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }
}
