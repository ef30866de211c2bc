//! Bol.com listing of the "Breezy Retourkansjes" seller.
//!
//! The card's promo price is usually the new-product price; the returned
//! item's price appears as a "Retourdeal voor X" annotation in the card text.

use crate::config::bol as cfg;
use crate::error::Result;
use crate::models::{Deal, Listing, Source, Stock};
use crate::normalize::{make_id, parse_price};
use crate::scrapers::resolve_url;
use crate::scrapers::selectors::{
    clean_text, enclosing_anchor, image_source, raw_text, SelectorChain,
};
use crate::scrapers::traits::SourceAdapter;
use crate::scrapers::types::{ExtractedPage, PagePlan, SeenSet};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

fn retourdeal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[Rr]etourdeal\s+voor\s+(?:€\s*)?([\d.,]+)").expect("retourdeal regex is valid")
    })
}

struct Selectors {
    products: SelectorChain,
    title: SelectorChain,
    title_marker: SelectorChain,
    link: SelectorChain,
    any_link: SelectorChain,
    image: SelectorChain,
    price: SelectorChain,
    reference_price: SelectorChain,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            products: SelectorChain::parse(&[
                r#"[data-test="product-item"]"#,
                ".product-item--row",
                ".js_product_list_item",
                "[data-item-id]",
            ])?,
            title: SelectorChain::parse(&[
                r#"[data-test="product-title"]"#,
                ".product-title",
                r#"a[data-test="product-title-link"]"#,
                "h3",
                "h4",
            ])?,
            title_marker: SelectorChain::parse(&[r#"[data-test="product-title"]"#])?,
            link: SelectorChain::parse(&[r#"a[data-test="product-title-link"]"#, "a.product-title"])?,
            any_link: SelectorChain::parse(&["a"])?,
            image: SelectorChain::parse(&[r#"[data-test="product-image"] img"#, "img"])?,
            price: SelectorChain::parse(&[
                r#"[data-test="price-value"]"#,
                ".promo-price",
                ".price-block__highlight",
                r#"[class*="price"]"#,
            ])?,
            reference_price: SelectorChain::parse(&[
                r#"[data-test="reference-price"]"#,
                ".price--old",
                ".price-block__old-price",
                r#"[class*="price-old"]"#,
                r#"[class*="was"]"#,
            ])?,
        })
    }
}

/// Price pair after applying the deal-price annotation
#[derive(Debug, Clone, Copy, PartialEq)]
struct Prices {
    current: Option<f64>,
    original: Option<f64>,
    annotated: bool,
}

/// A "Retourdeal voor X" price strictly below the listed price becomes the
/// current price, and the listed price becomes the original.
fn apply_retourdeal(listed: Option<f64>, reference: Option<f64>, card_text: &str) -> Prices {
    let deal_price = retourdeal_re()
        .captures(card_text)
        .map(|caps| parse_price(&caps[1]));

    let mut prices = Prices {
        current: listed,
        original: reference,
        annotated: deal_price.is_some(),
    };

    if let (Some(Some(deal)), Some(listed)) = (deal_price, listed) {
        if deal > 0.0 && deal < listed {
            prices.original = Some(listed);
            prices.current = Some(deal);
        }
    }

    prices
}

/// Breezy Retourkansjes scraper implementation
pub struct BolScraper {
    base: Url,
    plan: PagePlan,
    selectors: Selectors,
}

impl BolScraper {
    pub fn new() -> Result<Self> {
        Self::with_plan(PagePlan {
            page_size: None,
            max_pages: cfg::MAX_PAGES,
            delay: cfg::DELAY,
            timeout: cfg::TIMEOUT,
        })
    }

    pub fn with_plan(plan: PagePlan) -> Result<Self> {
        Ok(Self {
            base: Url::parse(cfg::BASE_URL)?,
            plan,
            selectors: Selectors::new()?,
        })
    }

    fn link_of<'a>(&self, product: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors
            .link
            .first(product)
            .or_else(|| {
                self.selectors
                    .title_marker
                    .first(product)
                    .and_then(enclosing_anchor)
            })
            .or_else(|| self.selectors.any_link.first(product))
    }

    fn to_deal(
        &self,
        product: ElementRef<'_>,
        seen: &mut SeenSet,
        scraped_at: DateTime<Utc>,
    ) -> Option<Deal> {
        let title = self
            .selectors
            .title
            .first(product)
            .map(clean_text)
            .unwrap_or_default();
        if title.is_empty() {
            debug!("Bol card without title skipped");
            return None;
        }

        let link = self
            .link_of(product)
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(&self.base, href))
            .unwrap_or_default();

        if !seen.first_id(make_id(&link, &title)) {
            debug!("Duplicate Bol listing skipped: {}", title);
            return None;
        }

        let image = self
            .selectors
            .image
            .first(product)
            .and_then(image_source)
            .map(|src| resolve_url(&self.base, src))
            .unwrap_or_default();

        let listed = self
            .selectors
            .price
            .first(product)
            .and_then(|el| parse_price(&raw_text(el)));
        let reference = self
            .selectors
            .reference_price
            .first(product)
            .and_then(|el| parse_price(&raw_text(el)));

        let prices = apply_retourdeal(listed, reference, &raw_text(product));
        let (condition, badge) = if prices.annotated {
            ("Retour", "RETOUR")
        } else {
            ("Gebruikt/Retour", "DEAL")
        };

        let deal = Listing {
            source: Source::Bol,
            title: title.clone(),
            url: link,
            image,
            current_price: prices.current,
            original_price: prices.original,
            condition: condition.to_string(),
            badge: badge.to_string(),
            stock: Stock::InStock,
            scraped_at,
        }
        .into_deal();

        if deal.is_none() {
            debug!("Bol card without price skipped: {}", title);
        }
        deal
    }
}

#[async_trait]
impl SourceAdapter for BolScraper {
    fn source(&self) -> Source {
        Source::Bol
    }

    fn plan(&self) -> &PagePlan {
        &self.plan
    }

    fn listings(&self) -> Vec<String> {
        vec![format!("{}{}", cfg::BASE_URL, cfg::LISTING_PATH)]
    }

    fn page_url(&self, listing: &str, page: u32) -> String {
        format!("{}?sort=1&page={}", listing, page + 1)
    }

    fn extract(&self, body: &str, seen: &mut SeenSet) -> Result<ExtractedPage> {
        let document = Html::parse_document(body);
        let products = self.selectors.products.all(document.root_element());
        let scraped_at = Utc::now();

        let deals = products
            .iter()
            .filter_map(|product| self.to_deal(*product, seen, scraped_at))
            .collect();

        Ok(ExtractedPage {
            item_count: products.len(),
            deals,
        })
    }
}
