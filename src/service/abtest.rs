use crate::models::campaignmodel::{Variant, VariantStats};

const OPEN_WEIGHT: f64 = 0.7;
const CLICK_WEIGHT: f64 = 0.3;

/// Share of the audience that receives the test send. Inverse-scales with
/// list size: small lists need half the audience to get a signal, large
/// lists only a tenth.
pub fn test_ratio(subscriber_count: i64) -> f64 {
    if subscriber_count < 100 {
        0.5
    } else if subscriber_count <= 500 {
        0.2
    } else {
        0.1
    }
}

pub fn variant_score(stats: &VariantStats) -> f64 {
    OPEN_WEIGHT * stats.open_rate + CLICK_WEIGHT * stats.click_rate
}

/// Fixed-weight scoring; ties resolve in favor of variant A.
pub fn determine_winner(a: &VariantStats, b: &VariantStats) -> Variant {
    if variant_score(b) > variant_score(a) {
        Variant::B
    } else {
        Variant::A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(open_rate: f64, click_rate: f64) -> VariantStats {
        VariantStats {
            open_rate,
            click_rate,
        }
    }

    #[test]
    fn ratio_scales_inversely_with_audience() {
        assert_eq!(test_ratio(50), 0.5);
        assert_eq!(test_ratio(300), 0.2);
        assert_eq!(test_ratio(1000), 0.1);
    }

    #[test]
    fn ratio_boundaries() {
        assert_eq!(test_ratio(99), 0.5);
        assert_eq!(test_ratio(100), 0.2);
        assert_eq!(test_ratio(500), 0.2);
        assert_eq!(test_ratio(501), 0.1);
    }

    #[test]
    fn tie_favors_variant_a() {
        let winner = determine_winner(&stats(0.5, 0.5), &stats(0.5, 0.5));
        assert_eq!(winner, Variant::A);
    }

    #[test]
    fn opens_outweigh_clicks() {
        // A: 0.7*0.4 + 0.3*0.1 = 0.31, B: 0.7*0.2 + 0.3*0.5 = 0.29
        let winner = determine_winner(&stats(0.4, 0.1), &stats(0.2, 0.5));
        assert_eq!(winner, Variant::A);
    }

    #[test]
    fn clearly_better_b_wins() {
        let winner = determine_winner(&stats(0.2, 0.1), &stats(0.6, 0.4));
        assert_eq!(winner, Variant::B);
    }
}
