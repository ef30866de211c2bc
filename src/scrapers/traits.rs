use crate::error::Result;
use crate::models::{Deal, Source};
use crate::scrapers::types::{ExtractedPage, PagePlan, SeenSet};
use async_trait::async_trait;
use std::time::Duration;

/// Something that can download a listing page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body; non-success statuses are errors
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// Common trait for all deal sources
///
/// An adapter only knows its own URLs and page shape; paging, throttling
/// and failure containment are shared in [`super::paginate`].
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> Source;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str {
        self.source().display_name()
    }

    fn plan(&self) -> &PagePlan;

    /// Listing endpoints, tried in order until one yields items.
    fn listings(&self) -> Vec<String>;

    /// URL of the zero-based `page` of `listing`
    fn page_url(&self, listing: &str, page: u32) -> String;

    /// Turn one response body into deals. Unusable items are dropped; an
    /// error means the page as a whole could not be read.
    fn extract(&self, body: &str, seen: &mut SeenSet) -> Result<ExtractedPage>;

    /// Scrape every page of this source
    async fn scrape(&self, fetcher: &dyn PageFetcher) -> Vec<Deal> {
        super::paginate(self, fetcher).await
    }
}
