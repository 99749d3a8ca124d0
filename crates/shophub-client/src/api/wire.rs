//! Backend payload shapes and their mapping onto domain types.

use serde::Deserialize;
use shophub_commerce::{Category, CommerceError, Currency, Money, Product, ProductId, Rating};

use super::AdminItem;

/// `GET /list-single-image/` response.
#[derive(Debug, Deserialize)]
pub(crate) struct ListPage {
    pub results: Vec<ListItem>,
    pub count: u64,
}

/// One listing row; carries a single image.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListItem {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_price: Option<WirePrice>,
    pub end_price: WirePrice,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<WireRating>,
}

/// `GET /items/{id}/` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DetailItem {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_price: Option<WirePrice>,
    pub end_price: WirePrice,
    #[serde(default)]
    pub images: Vec<WireImage>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<WireRating>,
}

/// One row of `GET /list/`. Prices stay textual for the edit form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminRow {
    pub id: ProductId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_price: Option<WirePrice>,
    #[serde(default)]
    pub end_price: Option<WirePrice>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub images: Vec<WireImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireImage {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireRating {
    pub rate: f64,
    #[serde(default)]
    pub count: u32,
}

/// Decimal prices arrive either as JSON numbers or as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WirePrice {
    Number(f64),
    Text(String),
}

impl WirePrice {
    pub fn to_money(&self, currency: Currency) -> Result<Money, CommerceError> {
        match self {
            WirePrice::Number(n) if n.is_finite() => Ok(Money::from_decimal(*n, currency)),
            WirePrice::Number(n) => Err(CommerceError::InvalidPrice(n.to_string())),
            WirePrice::Text(s) => Money::parse_decimal(s, currency),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            WirePrice::Number(n) => n.to_string(),
            WirePrice::Text(s) => s.trim().to_string(),
        }
    }
}

/// Resolve a media path the backend returns against its origin.
pub(crate) fn resolve_media(base_url: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

fn parse_category(raw: Option<&str>) -> Category {
    raw.and_then(|c| c.parse().ok()).unwrap_or(Category::All)
}

fn rating_or_default(raw: Option<&WireRating>) -> Rating {
    raw.map(|r| Rating::new(r.rate, r.count)).unwrap_or_default()
}

/// Current price is the end price; the start price is the struck-through
/// reference only when it differs.
fn price_pair(
    start: Option<&WirePrice>,
    end: &WirePrice,
    currency: Currency,
) -> Result<(Money, Option<Money>), CommerceError> {
    let price = end.to_money(currency)?;
    let original = match start {
        Some(start) => {
            let start = start.to_money(currency)?;
            (start.amount_cents != price.amount_cents).then_some(start)
        }
        None => None,
    };
    Ok((price, original))
}

impl ListItem {
    pub fn into_product(self, base_url: &str, currency: Currency) -> Result<Product, CommerceError> {
        let (price, original) = price_pair(self.start_price.as_ref(), &self.end_price, currency)?;

        let mut product = Product::new(self.id, self.title, price)
            .with_description(self.description)
            .with_category(parse_category(self.category.as_deref()))
            .with_rating(rating_or_default(self.rating.as_ref()));
        if let Some(original) = original {
            product = product.with_original_price(original);
        }
        if let Some(url) = self.image.as_deref().and_then(|p| resolve_media(base_url, p)) {
            product = product.with_image(url);
        }
        Ok(product)
    }
}

impl DetailItem {
    pub fn into_product(self, base_url: &str, currency: Currency) -> Result<Product, CommerceError> {
        let (price, original) = price_pair(self.start_price.as_ref(), &self.end_price, currency)?;

        let mut product = Product::new(self.id, self.title, price)
            .with_description(self.description)
            .with_category(parse_category(self.category.as_deref()))
            .with_rating(rating_or_default(self.rating.as_ref()));
        if let Some(original) = original {
            product = product.with_original_price(original);
        }
        for image in &self.images {
            if let Some(url) = resolve_media(base_url, &image.image) {
                product = product.with_image(url);
            }
        }
        Ok(product)
    }
}

impl AdminRow {
    pub fn into_item(self, base_url: &str) -> AdminItem {
        AdminItem {
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            start_price: self.start_price.map(|p| p.to_text()).unwrap_or_default(),
            end_price: self.end_price.map(|p| p.to_text()).unwrap_or_default(),
            category: self.category.filter(|c| !c.trim().is_empty()),
            images: self
                .images
                .iter()
                .filter_map(|i| resolve_media(base_url, &i.image))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://127.0.0.1:8000";

    #[test]
    fn test_listing_discount_only_when_prices_differ() {
        let page: ListPage = serde_json::from_str(
            r#"{
                "results": [
                    {"id": 1, "title": "Lamp", "description": "Desk lamp",
                     "startPrice": "120.00", "endPrice": "99.50", "image": "/media/lamp.jpg"},
                    {"id": 2, "title": "Mug", "startPrice": 8, "endPrice": "8.00"}
                ],
                "count": 2
            }"#,
        )
        .unwrap();

        let products: Vec<Product> = page
            .results
            .into_iter()
            .map(|item| item.into_product(BASE, Currency::USD).unwrap())
            .collect();

        assert_eq!(products[0].id.as_str(), "1");
        assert_eq!(products[0].price.amount_cents, 9950);
        assert_eq!(products[0].original_price.map(|m| m.amount_cents), Some(12000));
        assert_eq!(
            products[0].primary_image(),
            Some("http://127.0.0.1:8000/media/lamp.jpg")
        );
        assert_eq!(products[0].category, Category::All);
        assert_eq!(products[0].rating, Rating::new(4.0, 10));

        assert_eq!(products[1].original_price, None);
        assert!(products[1].images.is_empty());
    }

    #[test]
    fn test_listing_category_from_payload() {
        let item: ListItem = serde_json::from_str(
            r#"{"id": "a7", "title": "Ring", "endPrice": 40, "category": "Jewelery"}"#,
        )
        .unwrap();
        let product = item.into_product(BASE, Currency::USD).unwrap();
        assert_eq!(product.category, Category::Jewelery);

        let item: ListItem = serde_json::from_str(
            r#"{"id": 3, "title": "Thing", "endPrice": 1, "category": "garden"}"#,
        )
        .unwrap();
        assert_eq!(item.into_product(BASE, Currency::USD).unwrap().category, Category::All);
    }

    #[test]
    fn test_bad_price_is_an_error() {
        let item: ListItem =
            serde_json::from_str(r#"{"id": 1, "title": "X", "endPrice": "free"}"#).unwrap();
        assert!(matches!(
            item.into_product(BASE, Currency::USD),
            Err(CommerceError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_detail_images_and_rating() {
        let item: DetailItem = serde_json::from_str(
            r#"{"id": 9, "title": "Jacket", "startPrice": "60", "endPrice": "45",
                "images": [{"image": "/media/a.jpg"}, {"image": "https://cdn.example/b.jpg"}, {"image": ""}],
                "rating": {"rate": 3.5, "count": 120}}"#,
        )
        .unwrap();
        let product = item.into_product(BASE, Currency::USD).unwrap();

        assert_eq!(
            product.images,
            vec![
                "http://127.0.0.1:8000/media/a.jpg".to_string(),
                "https://cdn.example/b.jpg".to_string(),
            ]
        );
        assert_eq!(product.rating, Rating::new(3.5, 120));
        assert_eq!(product.savings().map(|m| m.amount_cents), Some(1500));
    }

    #[test]
    fn test_admin_row_keeps_text_prices() {
        let row: AdminRow = serde_json::from_str(
            r#"{"id": 4, "title": "Hat", "startPrice": 12.5, "endPrice": "10.00",
                "category": "", "images": [{"image": "media/hat.png"}]}"#,
        )
        .unwrap();
        let item = row.into_item(BASE);

        assert_eq!(item.start_price, "12.5");
        assert_eq!(item.end_price, "10.00");
        assert_eq!(item.category, None);
        assert_eq!(item.images, vec!["http://127.0.0.1:8000/media/hat.png".to_string()]);
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_resolve_media() {
        assert_eq!(resolve_media("http://h/", "/m/x.png").as_deref(), Some("http://h/m/x.png"));
        assert_eq!(resolve_media("http://h", "  "), None);
    }
}
