use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::{category, identity, price};

/// Retailer a deal was scraped from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Stekkerstore,
    Mediamarkt,
    Bol,
}

impl Source {
    /// Display name shown next to each deal
    pub fn display_name(self) -> &'static str {
        match self {
            Source::Stekkerstore => "Stekkerstore",
            Source::Mediamarkt => "MediaMarkt Outlet",
            Source::Bol => "Breezy Retourkansjes",
        }
    }

    pub fn logo(self) -> &'static str {
        match self {
            Source::Stekkerstore => "🔌",
            Source::Mediamarkt => "🔴",
            Source::Bol => "🛒",
        }
    }
}

/// Availability of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stock {
    #[serde(rename = "Op voorraad")]
    InStock,
    #[serde(rename = "Uitverkocht")]
    SoldOut,
}

/// Fixed category taxonomy, derived from the title
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Smartphones,
    Laptops,
    Tablets,
    Audio,
    Gaming,
    #[serde(rename = "huishouden")]
    Household,
    Wearables,
    Tv,
    #[serde(rename = "elektronica")]
    Electronics,
}

/// Canonical deal record, the only thing that ends up in the output file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: u32,
    pub title: String,
    pub current_price: f64,
    pub original_price: f64,
    pub discount: u32,
    pub url: String,
    pub image: String,
    pub source: Source,
    pub source_name: String,
    pub source_logo: String,
    pub condition: String,
    pub badge: String,
    pub stock: Stock,
    pub category: Category,
    pub icon: String,
    pub scraped_at: DateTime<Utc>,
}

/// Fields an adapter pulled out of one raw listing item, before validation.
///
/// Adapters fill this in with whatever they found; [`Listing::into_deal`]
/// applies the rules every source shares (required title and price,
/// original price fallback, discount, identity, category).
#[derive(Debug, Clone)]
pub struct Listing {
    pub source: Source,
    pub title: String,
    pub url: String,
    pub image: String,
    pub current_price: Option<f64>,
    pub original_price: Option<f64>,
    pub condition: String,
    pub badge: String,
    pub stock: Stock,
    pub scraped_at: DateTime<Utc>,
}

impl Listing {
    /// Turn the draft into a `Deal`, or `None` if the item is unusable
    /// (blank title or no positive current price).
    pub fn into_deal(self) -> Option<Deal> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return None;
        }

        let current = self.current_price.filter(|p| p.is_finite() && *p > 0.0)?;
        let current = price::round_cents(current);
        let original = match self.original_price {
            Some(p) if p.is_finite() && price::round_cents(p) > current => price::round_cents(p),
            _ => current,
        };

        let category = category::classify(&title);

        Some(Deal {
            id: identity::make_id(&self.url, &title),
            discount: price::discount_percent(original, current),
            current_price: current,
            original_price: original,
            url: self.url,
            image: self.image,
            source: self.source,
            source_name: self.source.display_name().to_string(),
            source_logo: self.source.logo().to_string(),
            condition: self.condition,
            badge: self.badge,
            stock: self.stock,
            icon: category::icon(category).to_string(),
            category,
            title,
            scraped_at: self.scraped_at,
        })
    }
}

/// The document written at the end of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealBatch {
    pub updated_at: DateTime<Utc>,
    pub total: usize,
    pub deals: Vec<Deal>,
}

impl DealBatch {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self {
            updated_at: Utc::now(),
            total: deals.len(),
            deals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(current: Option<f64>, original: Option<f64>) -> Listing {
        Listing {
            source: Source::Stekkerstore,
            title: "  Apple iPhone 13 Pro 128GB  ".to_string(),
            url: "https://stekkerstore.nl/products/iphone-13-pro".to_string(),
            image: String::new(),
            current_price: current,
            original_price: original,
            condition: "Tweedekans".to_string(),
            badge: "TWEEDEKANS".to_string(),
            stock: Stock::InStock,
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_into_deal_computes_discount() {
        let deal = listing(Some(80.0), Some(100.0)).into_deal().unwrap();
        assert_eq!(deal.discount, 20);
        assert_eq!(deal.title, "Apple iPhone 13 Pro 128GB");
        assert_eq!(deal.category, Category::Smartphones);
        assert_eq!(deal.icon, "📱");
        assert_eq!(deal.source_name, "Stekkerstore");
    }

    #[test]
    fn test_missing_or_lower_original_falls_back_to_current() {
        let deal = listing(Some(80.0), None).into_deal().unwrap();
        assert_eq!(deal.original_price, 80.0);
        assert_eq!(deal.discount, 0);

        let deal = listing(Some(80.0), Some(60.0)).into_deal().unwrap();
        assert_eq!(deal.original_price, 80.0);
        assert_eq!(deal.discount, 0);
    }

    #[test]
    fn test_unusable_items_are_dropped() {
        assert!(listing(None, Some(100.0)).into_deal().is_none());
        assert!(listing(Some(0.0), Some(100.0)).into_deal().is_none());

        let mut blank = listing(Some(10.0), None);
        blank.title = "   ".to_string();
        assert!(blank.into_deal().is_none());
    }

    #[test]
    fn test_deal_serializes_with_camel_case_fields() {
        let deal = listing(Some(80.0), Some(100.0)).into_deal().unwrap();
        let value = serde_json::to_value(&deal).unwrap();
        assert_eq!(value["currentPrice"], 80.0);
        assert_eq!(value["originalPrice"], 100.0);
        assert_eq!(value["sourceLogo"], "🔌");
        assert_eq!(value["source"], "stekkerstore");
        assert_eq!(value["stock"], "Op voorraad");
        assert!(value.get("scrapedAt").is_some());
    }
}
