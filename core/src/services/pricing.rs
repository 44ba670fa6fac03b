//! Pricing calculator: day counting and tiered discounting.
//!
//! Pure arithmetic, no I/O. Currency values are f64 and no rounding is
//! applied here; round at the presentation boundary if needed.

use chrono::NaiveDate;

/// Fixed cap table: maximum absolute reduction per discount tier.
///
/// Only these four percentages carry a cap. Any other percentage,
/// including values between tiers or above 25, applies the uncapped
/// proportional reduction. This table is a fixed contract; do not infer
/// a general formula from it.
const DISCOUNT_CAPS: [(f64, f64); 4] = [(10.0, 100.0), (15.0, 200.0), (20.0, 300.0), (25.0, 400.0)];

/// Inclusive day count of a rental period
///
/// Returns 1 when `start == end`: a single-day rental still occupies the
/// car for one day. Date ordering is the caller's obligation (the
/// admission policy validates it); this function just computes, and
/// yields a non-positive count for a reversed range.
pub fn total_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Price remaining after applying a discount percentage to `base`
///
/// The reduction is `base * percentage / 100`, capped by the tier table
/// for the four tabulated percentages. No floor at zero is applied: a
/// large uncapped percentage on a small base can mathematically invert
/// the sign, preserved as-is from the pricing contract.
pub fn price_after_discount(base: f64, percentage: f64) -> f64 {
    let mut reduction = base * percentage / 100.0;
    for (tier, cap) in DISCOUNT_CAPS {
        if percentage == tier {
            reduction = reduction.min(cap);
            break;
        }
    }
    base - reduction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_counts_one() {
        let d = date(2025, 6, 1);
        assert_eq!(total_days(d, d), 1);
    }

    #[test]
    fn test_day_count_grows_by_one_per_day() {
        let start = date(2025, 1, 10);
        for offset in 0..30 {
            let end = start + chrono::Duration::days(offset);
            assert_eq!(total_days(start, end), offset + 1);
        }
    }

    #[test]
    fn test_day_count_across_month_boundary() {
        assert_eq!(total_days(date(2025, 1, 30), date(2025, 2, 2)), 4);
    }

    #[test]
    fn test_capped_tiers() {
        // 10%: reduction min(100, base*0.10)
        assert_eq!(price_after_discount(2000.0, 10.0), 1900.0);
        assert_eq!(price_after_discount(500.0, 10.0), 450.0);
        // 15%: cap 200
        assert_eq!(price_after_discount(2000.0, 15.0), 1800.0);
        // 20%: cap 300
        assert_eq!(price_after_discount(1000.0, 20.0), 800.0);
        // 25%: cap 400
        assert_eq!(price_after_discount(2000.0, 25.0), 1600.0);
    }

    #[test]
    fn test_untabulated_percentage_is_uncapped() {
        assert_eq!(price_after_discount(1000.0, 5.0), 950.0);
        // 12% sits between tiers and gets no cap.
        assert_eq!(price_after_discount(10000.0, 12.0), 8800.0);
        // Above the top tier is also uncapped.
        assert_eq!(price_after_discount(10000.0, 50.0), 5000.0);
    }

    #[test]
    fn test_zero_discount() {
        assert_eq!(price_after_discount(1234.5, 0.0), 1234.5);
    }

    #[test]
    fn test_caps_only_bind_above_threshold() {
        // At 10% the cap binds once base exceeds 1000.
        assert_eq!(price_after_discount(1000.0, 10.0), 900.0);
        assert_eq!(price_after_discount(1001.0, 10.0), 901.0);
    }
}
