use crate::error::{Result, ScrapeError};
use crate::scrapers::traits::PageFetcher;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory fetcher serving canned bodies by URL and recording requests.
/// Unknown URLs answer with an HTTP 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| ScrapeError::Status {
            url: url.to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        })
    }
}
