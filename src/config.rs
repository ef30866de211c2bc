use std::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "nl-NL,nl;q=0.9,en;q=0.8";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

pub const DEFAULT_OUTPUT_PATH: &str = "deals.json";

/// Paging limits and politeness per source.
pub mod stekkerstore {
    use super::Duration;

    pub const BASE_URL: &str = "https://stekkerstore.nl";
    /// Collections tried in order; the first one with products wins.
    pub const COLLECTIONS: &[&str] = &["tweedekans", "refurbished", "outlet", "alle-producten"];
    pub const PAGE_SIZE: usize = 250;
    pub const MAX_PAGES: u32 = 20;
    pub const DELAY: Duration = Duration::from_secs(1);
    pub const TIMEOUT: Duration = Duration::from_secs(15);
}

pub mod mediamarkt {
    use super::Duration;

    pub const BASE_URL: &str = "https://outlet.mediamarkt.nl";
    pub const PAGE_SIZE: usize = 100;
    pub const MAX_PAGES: u32 = 5;
    pub const DELAY: Duration = Duration::from_secs(2);
    pub const TIMEOUT: Duration = Duration::from_secs(15);
}

pub mod bol {
    use super::Duration;

    pub const BASE_URL: &str = "https://www.bol.com";
    pub const LISTING_PATH: &str = "/nl/nl/w/alle-artikelen-breezy-retourkansjes/916223/";
    pub const MAX_PAGES: u32 = 4;
    /// Bol.com rate-limits aggressively.
    pub const DELAY: Duration = Duration::from_secs(3);
    pub const TIMEOUT: Duration = Duration::from_secs(20);
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the final batch is written (DEALS_OUTPUT)
    pub output_path: String,
    /// Tracing filter directive (LOG_LEVEL)
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            output_path: std::env::var("DEALS_OUTPUT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
