use regex::Regex;
use std::sync::OnceLock;

fn currency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[€$£\s]").expect("currency regex is valid"))
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("number regex is valid"))
}

/// Parse a price string such as `€ 1.299,99`, `89,99` or `199.00`.
///
/// When both separators appear the dot is a thousands separator and the
/// comma the decimal one; a lone comma is always decimal. Returns `None`
/// when the text holds no number at all.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned = currency_re().replace_all(text, "");
    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned.into_owned()
    };

    number_re()
        .find(&normalized)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Round to whole cents, ties to even
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Integer percentage drop from `original` to `current`, never negative.
/// Exact half percents round to the even neighbour.
pub fn discount_percent(original: f64, current: f64) -> u32 {
    if original > current && original > 0.0 {
        (100.0 * (original - current) / original).round_ties_even() as u32
    } else {
        0
    }
}
