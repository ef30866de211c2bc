//! Normalization helpers shared by all source adapters
//!
//! Everything here is pure: price text to numbers, titles to categories,
//! and (url, title) pairs to stable ids.

pub mod category;
pub mod identity;
pub mod price;

pub use identity::make_id;
pub use price::parse_price;
