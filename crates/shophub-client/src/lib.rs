//! ShopHub storefront client.
//!
//! View state for the storefront screens (listing, product page, admin
//! upload, login) over the ShopHub REST backend:
//!
//! - [`views`]: one state container per screen, driven by explicit calls
//! - [`api`]: service traits and their HTTP implementation
//! - [`notify`]: alerts, confirmations and auto-dismissing toasts
//! - [`config`] and [`logging`]: TOML/JSON settings and `tracing` setup
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shophub_client::prelude::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = StorefrontConfig::load("storefront.toml")?.apply_env();
//! init_tracing(&config.logging)?;
//!
//! let mut store = Storefront::new(config, Arc::new(LoggingPrompt::default()));
//! let mut catalog = store.catalog();
//! catalog.load().await;
//! catalog.set_search("lamp");
//!
//! if let Some(first) = catalog.visible_products().first() {
//!     catalog.add_to_cart(&first.id, store.cart_mut());
//! }
//! println!("{}", store.cart_totals()?.total);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod views;

#[cfg(test)]
mod testing;

pub use app::{Services, Storefront};
pub use config::StorefrontConfig;
pub use error::ApiError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{
        AdminItem, AdminService, AuthService, CatalogPage, CatalogService, Credentials,
        ProductDraft, StorefrontApi, UploadFile,
    };
    pub use crate::app::{Services, Storefront};
    pub use crate::config::StorefrontConfig;
    pub use crate::error::ApiError;
    pub use crate::logging::{init_tracing, LogFormat, LogLevel, LoggingConfig, ViewLogger};
    pub use crate::notify::{LoggingPrompt, Prompt, Toast, Toasts};
    pub use crate::views::{
        AdminView, CatalogView, DeleteOutcome, LoadState, LoginOutcome, LoginView,
        ProductDetailView, Status, SubmitOutcome,
    };
}
