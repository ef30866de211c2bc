//! Stekkerstore runs on Shopify, which exposes `/collections/<slug>/products.json`
//! for every collection without authentication.

use crate::config::stekkerstore as cfg;
use crate::error::Result;
use crate::models::{Deal, Listing, Source, Stock};
use crate::normalize::parse_price;
use crate::scrapers::resolve_url;
use crate::scrapers::traits::SourceAdapter;
use crate::scrapers::types::{ExtractedPage, PagePlan, SeenSet};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
struct ProductsPage {
    #[serde(default)]
    products: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ShopifyProduct {
    #[serde(default)]
    title: String,
    #[serde(default)]
    handle: String,
    #[serde(default)]
    variants: Vec<ShopifyVariant>,
    #[serde(default)]
    images: Vec<ShopifyImage>,
}

#[derive(Debug, Deserialize)]
struct ShopifyVariant {
    #[serde(default)]
    price: Option<PriceField>,
    #[serde(default)]
    compare_at_price: Option<PriceField>,
    #[serde(default)]
    available: bool,
}

#[derive(Debug, Deserialize)]
struct ShopifyImage {
    #[serde(default)]
    src: String,
}

/// Shopify sends prices as strings ("89.99"); some themes send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    fn amount(&self) -> Option<f64> {
        match self {
            PriceField::Number(n) => Some(*n),
            PriceField::Text(s) => s.trim().parse().ok().or_else(|| parse_price(s)),
        }
    }
}

/// Stekkerstore scraper implementation
pub struct StekkerstoreScraper {
    base: Url,
    plan: PagePlan,
}

impl StekkerstoreScraper {
    pub fn new() -> Result<Self> {
        Self::with_plan(PagePlan {
            page_size: Some(cfg::PAGE_SIZE),
            max_pages: cfg::MAX_PAGES,
            delay: cfg::DELAY,
            timeout: cfg::TIMEOUT,
        })
    }

    pub fn with_plan(plan: PagePlan) -> Result<Self> {
        Ok(Self {
            base: Url::parse(cfg::BASE_URL)?,
            plan,
        })
    }

    fn to_deal(&self, product: ShopifyProduct, scraped_at: DateTime<Utc>) -> Option<Deal> {
        let variant = product.variants.first()?;
        let link = resolve_url(&self.base, &format!("/products/{}", product.handle));
        let image = product
            .images
            .first()
            .map(|img| resolve_url(&self.base, &img.src))
            .unwrap_or_default();
        let available = product.variants.iter().any(|v| v.available);

        Listing {
            source: Source::Stekkerstore,
            title: product.title,
            url: link,
            image,
            current_price: variant.price.as_ref().and_then(PriceField::amount),
            original_price: variant.compare_at_price.as_ref().and_then(PriceField::amount),
            condition: "Tweedekans".to_string(),
            badge: "TWEEDEKANS".to_string(),
            stock: if available { Stock::InStock } else { Stock::SoldOut },
            scraped_at,
        }
        .into_deal()
    }
}

#[async_trait]
impl SourceAdapter for StekkerstoreScraper {
    fn source(&self) -> Source {
        Source::Stekkerstore
    }

    fn plan(&self) -> &PagePlan {
        &self.plan
    }

    fn listings(&self) -> Vec<String> {
        cfg::COLLECTIONS
            .iter()
            .map(|slug| format!("{}/collections/{}/products.json", cfg::BASE_URL, slug))
            .collect()
    }

    fn page_url(&self, listing: &str, page: u32) -> String {
        format!("{}?limit={}&page={}", listing, cfg::PAGE_SIZE, page + 1)
    }

    fn extract(&self, body: &str, seen: &mut SeenSet) -> Result<ExtractedPage> {
        let page: ProductsPage = serde_json::from_str(body)?;
        let scraped_at = Utc::now();
        let item_count = page.products.len();

        let mut deals = Vec::new();
        for raw in page.products {
            let product: ShopifyProduct = match serde_json::from_value(raw) {
                Ok(product) => product,
                Err(e) => {
                    debug!("Stekkerstore product skipped: {}", e);
                    continue;
                }
            };

            match self.to_deal(product, scraped_at) {
                Some(deal) if seen.first_id(deal.id) => deals.push(deal),
                Some(_) => {}
                None => debug!("Stekkerstore product without title or price skipped"),
            }
        }

        Ok(ExtractedPage { item_count, deals })
    }
}
