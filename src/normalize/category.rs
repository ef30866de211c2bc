use crate::models::Category;

/// Keyword sets, checked top to bottom; the first hit wins.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::Smartphones,
        &["iphone", "samsung galaxy", "smartphone", "gsm", "telefon"],
    ),
    (Category::Laptops, &["laptop", "macbook", "notebook", "chromebook"]),
    (Category::Tablets, &["ipad", "tablet", "e-reader", "kindle"]),
    (
        Category::Audio,
        &["airpods", "koptelefoon", "headset", "speaker", "audio", "oordopjes", "soundbar"],
    ),
    (
        Category::Gaming,
        &["playstation", "xbox", "nintendo", "gaming", "game", "controller"],
    ),
    (
        Category::Household,
        &[
            "stofzuiger",
            "wasmachine",
            "droger",
            "koelkast",
            "espresso",
            "koffie",
            "airfryer",
            "magnetron",
            "vaatwasser",
        ],
    ),
    (Category::Wearables, &["watch", "smartwatch", "fitbit", "garmin"]),
    (Category::Tv, &["tv ", "televisie", "monitor", "beamer"]),
];

/// Map a product title onto the category taxonomy
pub fn classify(title: &str) -> Category {
    let lower = title.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Electronics)
}

pub fn icon(category: Category) -> &'static str {
    match category {
        Category::Smartphones | Category::Tablets => "📱",
        Category::Laptops => "💻",
        Category::Audio => "🎧",
        Category::Gaming => "🎮",
        Category::Household => "🏠",
        Category::Wearables => "⌚",
        Category::Tv => "📺",
        Category::Electronics => "⚡",
    }
}
