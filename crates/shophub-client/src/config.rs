//! Storefront configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shophub_commerce::{cart::TaxRate, search::DEFAULT_PRICE_CEILING, Currency};
use std::path::Path;
use std::time::Duration;

use crate::logging::LoggingConfig;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "SHOPHUB_API_URL";

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Backend endpoints.
    #[serde(default)]
    pub api: ApiConfig,

    /// Listing behaviour.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart pricing.
    #[serde(default)]
    pub cart: CartConfig,

    /// Toast behaviour.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a TOML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides.
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
        self
    }

    /// Reject settings the views cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url must not be empty");
        }
        if self.catalog.page_size == 0 {
            bail!("catalog.page_size must be at least 1");
        }
        if !(self.catalog.price_ceiling.is_finite() && self.catalog.price_ceiling >= 0.0) {
            bail!("catalog.price_ceiling must be a non-negative number");
        }
        if !(self.cart.tax_rate_percent.is_finite() && self.cart.tax_rate_percent >= 0.0) {
            bail!("cart.tax_rate_percent must be a non-negative number");
        }
        Ok(())
    }
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin (e.g., "http://127.0.0.1:8000").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix of the catalog endpoints.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Path of the external OAuth login entry point.
    #[serde(default = "default_oauth_login_path")]
    pub oauth_login_path: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_oauth_login_path() -> String {
    "/accounts/google/login/".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            oauth_login_path: default_oauth_login_path(),
        }
    }
}

impl ApiConfig {
    /// Absolute URL of the OAuth login entry point.
    pub fn oauth_login_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.oauth_login_path.trim_start_matches('/')
        )
    }
}

/// Catalog listing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Upper end of the price filter.
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    /// Currency the backend prices are in.
    #[serde(default)]
    pub currency: Currency,
}

fn default_page_size() -> u32 {
    12
}

fn default_price_ceiling() -> f64 {
    DEFAULT_PRICE_CEILING
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            price_ceiling: default_price_ceiling(),
            currency: Currency::default(),
        }
    }
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Sales tax percentage.
    #[serde(default = "default_tax_rate_percent")]
    pub tax_rate_percent: f64,
}

fn default_tax_rate_percent() -> f64 {
    8.0
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            tax_rate_percent: default_tax_rate_percent(),
        }
    }
}

impl CartConfig {
    /// The configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_percent(self.tax_rate_percent)
    }
}

/// Toast configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long a toast stays visible, in milliseconds.
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
}

fn default_toast_ms() -> u64 {
    3000
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
        }
    }
}

impl NotificationConfig {
    /// Toast lifetime.
    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.price_ceiling, 1500.0);
        assert_eq!(config.cart.tax_rate().percent(), 8.0);
        assert_eq!(config.notifications.toast_lifetime(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://shop.example"

            [catalog]
            page_size = 24
            currency = "INR"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://shop.example");
        assert_eq!(config.api.api_prefix, "/api");
        assert_eq!(config.catalog.page_size, 24);
        assert_eq!(config.catalog.currency, Currency::INR);
        assert_eq!(config.catalog.price_ceiling, 1500.0);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(matches!(config.logging.format, LogFormat::Json));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.catalog.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.cart.tax_rate_percent = -1.0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oauth_login_url() {
        let api = ApiConfig {
            base_url: "http://127.0.0.1:8000/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            api.oauth_login_url(),
            "http://127.0.0.1:8000/accounts/google/login/"
        );
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("shophub-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"cart": {"tax_rate_percent": 5.0}}"#).unwrap();

        let config = StorefrontConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.cart.tax_rate_percent, 5.0);
        assert_eq!(config.catalog.page_size, 12);
    }

    #[test]
    fn test_load_missing_file() {
        let err = StorefrontConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
