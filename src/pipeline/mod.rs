//! Aggregation: run every source, then filter, rank and deduplicate.

pub mod scoring;

use crate::error::Result;
use crate::models::{Deal, DealBatch, Stock};
use crate::scrapers::{
    BolScraper, HttpFetcher, MediaMarktScraper, PageFetcher, SourceAdapter, StekkerstoreScraper,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

pub use scoring::score;

/// Runs a fixed set of source adapters against one fetcher
pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    fetcher: Arc<dyn PageFetcher>,
}

impl Aggregator {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { adapters, fetcher }
    }

    /// Stekkerstore, MediaMarkt Outlet and Bol.com over HTTP
    pub fn with_default_sources() -> Result<Self> {
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(StekkerstoreScraper::new()?),
            Arc::new(MediaMarktScraper::new()?),
            Arc::new(BolScraper::new()?),
        ];
        Ok(Self::new(adapters, Arc::new(HttpFetcher::new()?)))
    }

    /// Scrape all sources concurrently, one task per source. Results are
    /// concatenated in adapter order regardless of completion order.
    pub async fn collect(&self) -> Vec<Deal> {
        let handles: Vec<_> = self
            .adapters
            .iter()
            .map(|adapter| {
                let adapter = Arc::clone(adapter);
                let fetcher = Arc::clone(&self.fetcher);
                tokio::spawn(async move { adapter.scrape(fetcher.as_ref()).await })
            })
            .collect();

        let mut all = Vec::new();
        for (adapter, handle) in self.adapters.iter().zip(handles) {
            match handle.await {
                Ok(deals) => {
                    info!("  → {} deals from {}", deals.len(), adapter.source_name());
                    all.extend(deals);
                }
                Err(e) => warn!("{} scrape task failed: {}", adapter.source_name(), e),
            }
        }
        all
    }

    pub async fn run(&self) -> DealBatch {
        let raw = self.collect().await;
        DealBatch::new(rank(raw))
    }
}

/// Keep discounted, in-stock deals, order them by score (stable for ties)
/// and drop repeated ids, keeping the best-scored copy.
pub fn rank(deals: Vec<Deal>) -> Vec<Deal> {
    info!("📊 Raw total: {} deals", deals.len());

    let mut scored: Vec<(f64, Deal)> = deals
        .into_iter()
        .filter(|d| d.discount > 0 && d.stock == Stock::InStock)
        .map(|d| (score(&d), d))
        .collect();
    info!("📊 After filtering (discount > 0): {} deals", scored.len());

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut seen = HashSet::new();
    let unique: Vec<Deal> = scored
        .into_iter()
        .map(|(_, deal)| deal)
        .filter(|deal| seen.insert(deal.id))
        .collect();
    info!("✅ Final unique deals: {}", unique.len());

    unique
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Listing, Source};
    use crate::scrapers::testing::ScriptedFetcher;
    use crate::scrapers::types::{ExtractedPage, PagePlan, SeenSet};
    use async_trait::async_trait;
    use chrono::Utc;

    pub fn deal(source: Source, title: &str, current: f64, original: f64) -> Deal {
        Listing {
            source,
            title: title.to_string(),
            url: format!("https://example.test/{}", title.replace(' ', "-")),
            image: String::new(),
            current_price: Some(current),
            original_price: Some(original),
            condition: String::new(),
            badge: String::new(),
            stock: Stock::InStock,
            scraped_at: Utc::now(),
        }
        .into_deal()
        .unwrap()
    }

    /// Adapter that ignores the fetcher and returns fixed deals
    struct FixedAdapter {
        source: Source,
        deals: Vec<Deal>,
        plan: PagePlan,
    }

    impl FixedAdapter {
        fn new(source: Source, deals: Vec<Deal>) -> Arc<dyn SourceAdapter> {
            Arc::new(Self {
                source,
                deals,
                plan: PagePlan::immediate(None, 1),
            })
        }
    }

    #[async_trait]
    impl SourceAdapter for FixedAdapter {
        fn source(&self) -> Source {
            self.source
        }

        fn plan(&self) -> &PagePlan {
            &self.plan
        }

        fn listings(&self) -> Vec<String> {
            Vec::new()
        }

        fn page_url(&self, listing: &str, _page: u32) -> String {
            listing.to_string()
        }

        fn extract(&self, _body: &str, _seen: &mut SeenSet) -> Result<ExtractedPage> {
            Ok(ExtractedPage::default())
        }

        async fn scrape(&self, _fetcher: &dyn PageFetcher) -> Vec<Deal> {
            self.deals.clone()
        }
    }

    fn titles(deals: &[Deal]) -> Vec<&str> {
        deals.iter().map(|d| d.title.as_str()).collect()
    }

    #[test]
    fn test_filter_drops_zero_discount_and_sold_out() {
        let mut sold_out = deal(Source::Stekkerstore, "iPhone 13", 500.0, 700.0);
        sold_out.stock = Stock::SoldOut;
        let full_price = deal(Source::Bol, "Kindle", 100.0, 100.0);
        let good = deal(Source::Mediamarkt, "Xbox Series X", 400.0, 500.0);

        let ranked = rank(vec![sold_out, full_price, good]);
        assert_eq!(titles(&ranked), vec!["Xbox Series X"]);
    }

    #[test]
    fn test_dedup_keeps_higher_scored_copy() {
        let low = deal(Source::Bol, "AirPods Pro", 240.0, 250.0);
        let mut high = deal(Source::Bol, "AirPods Pro", 150.0, 250.0);
        high.id = low.id;

        let ranked = rank(vec![low, high]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].current_price, 150.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let a = deal(Source::Bol, "Speaker A", 80.0, 100.0);
        let b = deal(Source::Bol, "Speaker B", 80.0, 100.0);
        let ranked = rank(vec![a, b]);
        assert_eq!(titles(&ranked), vec!["Speaker A", "Speaker B"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_ranking() {
        let watch = deal(Source::Stekkerstore, "Garmin Fenix 7", 450.0, 600.0);
        let tablet = deal(Source::Stekkerstore, "iPad Air", 500.0, 520.0);
        let tv = deal(Source::Mediamarkt, "LG OLED TV 55", 900.0, 1500.0);
        let full = deal(Source::Mediamarkt, "Random Gadget", 50.0, 50.0);
        let mut dup = deal(Source::Bol, "Garmin Fenix 7 retour", 500.0, 600.0);
        dup.id = watch.id;
        let console = deal(Source::Bol, "Nintendo Switch", 200.0, 330.0);

        let aggregator = Aggregator::new(
            vec![
                FixedAdapter::new(Source::Stekkerstore, vec![watch, tablet]),
                FixedAdapter::new(Source::Mediamarkt, vec![tv, full]),
                FixedAdapter::new(Source::Bol, vec![dup, console]),
            ],
            Arc::new(ScriptedFetcher::default()),
        );

        let batch = aggregator.run().await;
        // tv: 80 + 20 + 8 = 108; console: 78 + 13 + 3 = 94
        // watch: 50 + 15 + 5 + 2 = 72; dup: 34 + 10 + 5 = 49 (dropped)
        // tablet: 8 + 2 + 5 + 2 = 17; gadget has no discount
        assert_eq!(
            titles(&batch.deals),
            vec!["LG OLED TV 55", "Nintendo Switch", "Garmin Fenix 7", "iPad Air"]
        );
        assert_eq!(batch.total, 4);
        let ids: HashSet<u32> = batch.deals.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 4);
    }

    #[tokio::test]
    async fn test_collect_preserves_adapter_order() {
        let aggregator = Aggregator::new(
            vec![
                FixedAdapter::new(Source::Bol, vec![deal(Source::Bol, "B", 1.0, 2.0)]),
                FixedAdapter::new(Source::Mediamarkt, vec![]),
                FixedAdapter::new(Source::Stekkerstore, vec![deal(Source::Stekkerstore, "S", 1.0, 2.0)]),
            ],
            Arc::new(ScriptedFetcher::default()),
        );
        assert_eq!(titles(&aggregator.collect().await), vec!["B", "S"]);
    }
}
