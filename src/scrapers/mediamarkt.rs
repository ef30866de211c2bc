//! MediaMarkt Outlet is an OpenCart shop with server-rendered listings.

use crate::config::mediamarkt as cfg;
use crate::error::Result;
use crate::models::{Deal, Listing, Source, Stock};
use crate::normalize::parse_price;
use crate::normalize::price::round_cents;
use crate::scrapers::resolve_url;
use crate::scrapers::selectors::{clean_text, image_source, raw_text, SelectorChain};
use crate::scrapers::traits::SourceAdapter;
use crate::scrapers::types::{ExtractedPage, PagePlan, SeenSet};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

fn percent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*%").expect("percent regex is valid"))
}

struct Selectors {
    products: SelectorChain,
    title: SelectorChain,
    image: SelectorChain,
    old_price: SelectorChain,
    new_price: SelectorChain,
    tax: SelectorChain,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            products: SelectorChain::parse(&[".product-layout", ".product-thumb"])?,
            title: SelectorChain::parse(&[".caption h4 a", "h4 a", ".name a"])?,
            image: SelectorChain::parse(&[".image img"])?,
            old_price: SelectorChain::parse(&[".price-old"])?,
            new_price: SelectorChain::parse(&[".price-new", ".price"])?,
            tax: SelectorChain::parse(&[".price-tax"])?,
        })
    }
}

/// MediaMarkt Outlet scraper implementation
pub struct MediaMarktScraper {
    base: Url,
    plan: PagePlan,
    selectors: Selectors,
}

impl MediaMarktScraper {
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
            selectors: Selectors::new()?,
        })
    }

    /// Discount printed next to the price, e.g. "-25%"
    fn printed_discount(&self, product: ElementRef<'_>) -> Option<u32> {
        let text = raw_text(self.selectors.tax.first(product)?);
        percent_re()
            .captures(&text)
            .and_then(|caps| caps[1].parse().ok())
    }

    fn to_deal(
        &self,
        product: ElementRef<'_>,
        seen: &mut SeenSet,
        scraped_at: DateTime<Utc>,
    ) -> Option<Deal> {
        let Some(title_el) = self.selectors.title.first(product) else {
            debug!("MediaMarkt card without title skipped");
            return None;
        };
        let title = clean_text(title_el);
        if title.is_empty() {
            debug!("MediaMarkt card without title skipped");
            return None;
        }

        // the listing sometimes renders the same product twice
        if !seen.first_title(&title) {
            debug!("Duplicate MediaMarkt title skipped: {}", title);
            return None;
        }

        let link = resolve_url(&self.base, title_el.value().attr("href").unwrap_or(""));
        let image = self
            .selectors
            .image
            .first(product)
            .and_then(image_source)
            .map(|src| resolve_url(&self.base, src))
            .unwrap_or_default();

        let current = self
            .selectors
            .new_price
            .first(product)
            .and_then(|el| parse_price(&raw_text(el)));
        let mut original = self
            .selectors
            .old_price
            .first(product)
            .and_then(|el| parse_price(&raw_text(el)));

        if original.is_none() {
            if let (Some(current), Some(pct)) = (current, self.printed_discount(product)) {
                if pct > 0 && pct < 100 {
                    original = Some(round_cents(current / (1.0 - f64::from(pct) / 100.0)));
                }
            }
        }

        let deal = Listing {
            source: Source::Mediamarkt,
            title: title.clone(),
            url: link,
            image,
            current_price: current,
            original_price: original,
            condition: "Outlet".to_string(),
            badge: "OUTLET".to_string(),
            stock: Stock::InStock,
            scraped_at,
        }
        .into_deal();

        if deal.is_none() {
            debug!("MediaMarkt card without price skipped: {}", title);
        }
        deal
    }
}

#[async_trait]
impl SourceAdapter for MediaMarktScraper {
    fn source(&self) -> Source {
        Source::Mediamarkt
    }

    fn plan(&self) -> &PagePlan {
        &self.plan
    }

    fn listings(&self) -> Vec<String> {
        vec![format!(
            "{}/index.php?route=product/search&search=&sort=p.date_added&order=DESC",
            cfg::BASE_URL
        )]
    }

    fn page_url(&self, listing: &str, page: u32) -> String {
        let start = page as usize * cfg::PAGE_SIZE;
        format!("{}&limit={}&start={}", listing, cfg::PAGE_SIZE, start)
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
