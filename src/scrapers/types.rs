use crate::models::Deal;
use std::collections::HashSet;
use std::time::Duration;

/// How a source is paged and throttled
#[derive(Debug, Clone)]
pub struct PagePlan {
    /// Items the source returns on a full page. A shorter page is the last
    /// one. `None` when the source has no fixed page size.
    pub page_size: Option<usize>,
    /// Hard cap on pages fetched per listing
    pub max_pages: u32,
    /// Pause between consecutive requests to the same source
    pub delay: Duration,
    /// Per-request network timeout
    pub timeout: Duration,
}

impl PagePlan {
    /// Plan with no politeness delay, used by tests
    #[cfg(test)]
    pub fn immediate(page_size: Option<usize>, max_pages: u32) -> Self {
        Self {
            page_size,
            max_pages,
            delay: Duration::ZERO,
            timeout: Duration::from_secs(1),
        }
    }
}

/// Result of extracting one listing page
#[derive(Debug, Default)]
pub struct ExtractedPage {
    /// Raw items found on the page, kept or not
    pub item_count: usize,
    pub deals: Vec<Deal>,
}

/// Duplicate tracking for one adapter invocation.
///
/// Created fresh by every scrape so repeated runs in one process start clean.
#[derive(Debug, Default)]
pub struct SeenSet {
    titles: HashSet<String>,
    ids: HashSet<u32>,
}

impl SeenSet {
    /// Record a title; false if it was already seen
    pub fn first_title(&mut self, title: &str) -> bool {
        self.titles.insert(title.to_string())
    }

    /// Record an id; false if it was already seen
    pub fn first_id(&mut self, id: u32) -> bool {
        self.ids.insert(id)
    }
}
