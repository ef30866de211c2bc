use crate::models::{Deal, Source};

/// Ranking heuristic: discount first, then absolute saving (capped), a
/// bonus for pricier items, and a small preference for Stekkerstore.
pub fn score(deal: &Deal) -> f64 {
    let saving = deal.original_price - deal.current_price;

    let mut score = f64::from(deal.discount) * 2.0;
    score += (saving / 10.0).min(20.0);
    score += price_tier_bonus(deal.current_price);

    if deal.source == Source::Stekkerstore {
        score += 2.0;
    }

    score
}

fn price_tier_bonus(current: f64) -> f64 {
    if current > 500.0 {
        8.0
    } else if current > 200.0 {
        5.0
    } else if current > 100.0 {
        3.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tests::deal;

    #[test]
    fn test_score_formula() {
        // 20% off 100 -> 40 + 2 saving + 0 tier
        let d = deal(Source::Mediamarkt, "Sony speaker", 80.0, 100.0);
        assert!((score(&d) - 42.0).abs() < 1e-9);

        // saving is capped at 20 points, tier 8, source bonus 2
        let d = deal(Source::Stekkerstore, "MacBook Pro", 1000.0, 2000.0);
        assert!((score(&d) - (100.0 + 20.0 + 8.0 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_higher_discount_scores_higher() {
        let mut a = deal(Source::Bol, "Kindle", 90.0, 100.0);
        let before = score(&a);
        a.discount += 1;
        assert!(score(&a) > before);
    }

    #[test]
    fn test_price_tier_boundaries() {
        let base = deal(Source::Bol, "Kindle", 100.0, 100.0);
        for (price, bonus) in [(100.01, 3.0), (200.01, 5.0), (500.01, 8.0)] {
            let mut above = base.clone();
            above.current_price = price;
            above.original_price = price;
            assert!((score(&above) - score(&base) - bonus).abs() < 1e-9);
        }
    }

    #[test]
    fn test_stekkerstore_bonus() {
        let a = deal(Source::Stekkerstore, "iPad", 80.0, 100.0);
        let b = deal(Source::Bol, "iPad", 80.0, 100.0);
        assert!((score(&a) - score(&b) - 2.0).abs() < 1e-9);
    }
}
