pub mod bol;
pub mod http;
pub mod mediamarkt;
pub mod selectors;
pub mod stekkerstore;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use bol::BolScraper;
pub use http::HttpFetcher;
pub use mediamarkt::MediaMarktScraper;
pub use stekkerstore::StekkerstoreScraper;
pub use traits::{PageFetcher, SourceAdapter};

use crate::models::Deal;
use types::SeenSet;
use tracing::{debug, info, warn};
use url::Url;

/// Make `href` absolute against the source's base URL. Empty stays empty.
pub fn resolve_url(base: &Url, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    base.join(href).map(String::from).unwrap_or_default()
}

/// Walk an adapter's listings page by page.
///
/// Stops a listing on an empty page, a page shorter than the plan's page
/// size, the page cap, or any fetch/parse failure; deals collected so far
/// are kept. The first listing that produced items ends the walk.
pub async fn paginate<A>(adapter: &A, fetcher: &dyn PageFetcher) -> Vec<Deal>
where
    A: SourceAdapter + ?Sized,
{
    let plan = adapter.plan();
    let name = adapter.source_name();
    let mut seen = SeenSet::default();
    let mut deals = Vec::new();
    let mut requests = 0u32;

    for listing in adapter.listings() {
        let mut found_any = false;

        for page in 0..plan.max_pages {
            if requests > 0 {
                tokio::time::sleep(plan.delay).await;
            }
            requests += 1;

            let url = adapter.page_url(&listing, page);
            let body = match fetcher.fetch(&url, plan.timeout).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("{} page {} failed: {}", name, page + 1, e);
                    break;
                }
            };

            let extracted = match adapter.extract(&body, &mut seen) {
                Ok(extracted) => extracted,
                Err(e) => {
                    warn!("{} page {} could not be parsed: {}", name, page + 1, e);
                    break;
                }
            };

            if extracted.item_count == 0 {
                debug!("No items on {} page {}, stopping", name, page + 1);
                break;
            }

            found_any = true;
            info!(
                "{} page {}: {} items, {} kept",
                name,
                page + 1,
                extracted.item_count,
                extracted.deals.len()
            );
            deals.extend(extracted.deals);

            if plan.page_size.is_some_and(|size| extracted.item_count < size) {
                break;
            }
        }

        if found_any {
            info!("✓ Found {} {} deals from {}", deals.len(), name, listing);
            break;
        }
    }

    deals
}
