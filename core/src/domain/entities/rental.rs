//! Rental entity representing one booking of one car by one user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default coupon label when no coupon was applied to a booking
pub const NO_COUPON: &str = "No coupon applied";

/// Lifecycle status of a rental
///
/// The only legal transition is `Confirmed` -> `Finished`; a finished
/// rental never becomes confirmed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalStatus {
    /// The booking is active
    Confirmed,
    /// The rental period is over
    Finished,
}

impl RentalStatus {
    /// String form as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Finished => "Finished",
        }
    }

    /// Parse the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Confirmed" => Some(Self::Confirmed),
            "Finished" => Some(Self::Finished),
            _ => None,
        }
    }
}

/// Whether a rental counts toward the owning user's this-year payment total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearlyInclusion {
    /// Counts toward `total_payment_this_year`
    Included,
    /// Counts only toward the cumulative `total_payment`
    Excluded,
}

impl YearlyInclusion {
    /// String form as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Included => "Included",
            Self::Excluded => "Excluded",
        }
    }

    /// Parse the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Included" => Some(Self::Included),
            "Excluded" => Some(Self::Excluded),
            _ => None,
        }
    }
}

/// Rental entity: one car, one user, one date range
///
/// Dates are calendar dates; time-of-day carries no meaning. The range is
/// a closed interval; a rental ending on a given day still occupies the
/// car for that whole day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    /// Unique identifier for the rental
    pub id: Uuid,

    /// Car being rented
    pub car_id: Uuid,

    /// User who booked the rental
    pub user_id: Uuid,

    /// Date the booking was issued
    pub issued_at: NaiveDate,

    /// First day of the rental period
    pub start_date: NaiveDate,

    /// Last day of the rental period (inclusive)
    pub end_date: NaiveDate,

    /// Derived inclusive day count, always >= 1 for a valid range
    pub total_days: i64,

    /// Derived price after discount
    pub total_price: f64,

    /// Discount percentage applied at booking time (0-100)
    pub discount: f64,

    /// Maximum absolute discount carried over from the coupon
    pub max_discount: f64,

    /// Name of the applied coupon
    pub coupon_name: String,

    /// Lifecycle status
    pub status: RentalStatus,

    /// Whether this rental counts toward the user's this-year total
    pub inclusion: YearlyInclusion,

    /// Timestamp when the rental record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the rental record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    /// Creates a new confirmed rental
    ///
    /// `total_days` and `total_price` are expected to come from the
    /// pricing calculator; this constructor does not recompute them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        car_id: Uuid,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_days: i64,
        total_price: f64,
        discount: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            car_id,
            user_id,
            issued_at: now.date_naive(),
            start_date,
            end_date,
            total_days,
            total_price,
            discount,
            max_discount: 0.0,
            coupon_name: NO_COUPON.to_string(),
            status: RentalStatus::Confirmed,
            inclusion: YearlyInclusion::Included,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a coupon label and its maximum discount
    pub fn with_coupon(mut self, coupon_name: impl Into<String>, max_discount: f64) -> Self {
        self.coupon_name = coupon_name.into();
        self.max_discount = max_discount;
        self
    }

    /// Closed-interval overlap test against a candidate date range
    ///
    /// Ranges that merely touch at a boundary day conflict too: same-day
    /// handover of a car is disallowed.
    pub fn overlaps_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    /// Status as observed at `today`, with the time-based transition applied
    ///
    /// A confirmed rental whose end date has passed reads as `Finished`
    /// even if the persisted sweep has not caught up with it yet.
    pub fn effective_status(&self, today: NaiveDate) -> RentalStatus {
        if self.status == RentalStatus::Confirmed && self.end_date < today {
            RentalStatus::Finished
        } else {
            self.status
        }
    }

    /// Force the rental into the `Finished` state (idempotent)
    pub fn finish(&mut self) {
        self.status = RentalStatus::Finished;
        self.updated_at = Utc::now();
    }

    /// Whether this rental counts toward the concurrent-rental cap
    pub fn is_confirmed(&self) -> bool {
        self.status == RentalStatus::Confirmed
    }

    /// Whether this rental counts toward the this-year total
    pub fn counts_toward_year(&self) -> bool {
        self.inclusion == YearlyInclusion::Included
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rental(start: NaiveDate, end: NaiveDate) -> Rental {
        Rental::new(Uuid::new_v4(), Uuid::new_v4(), start, end, 1, 100.0, 0.0)
    }

    #[test]
    fn test_new_rental_defaults() {
        let r = rental(date(2025, 1, 10), date(2025, 1, 15));
        assert_eq!(r.status, RentalStatus::Confirmed);
        assert_eq!(r.inclusion, YearlyInclusion::Included);
        assert_eq!(r.coupon_name, NO_COUPON);
        assert_eq!(r.max_discount, 0.0);
    }

    #[test]
    fn test_overlap_contained_range() {
        let r = rental(date(2025, 1, 10), date(2025, 1, 15));
        assert!(r.overlaps_range(date(2025, 1, 12), date(2025, 1, 13)));
        assert!(r.overlaps_range(date(2025, 1, 1), date(2025, 1, 31)));
    }

    #[test]
    fn test_overlap_partial_range() {
        let r = rental(date(2025, 1, 10), date(2025, 1, 15));
        assert!(r.overlaps_range(date(2025, 1, 12), date(2025, 1, 20)));
        assert!(r.overlaps_range(date(2025, 1, 5), date(2025, 1, 11)));
    }

    #[test]
    fn test_touching_boundaries_overlap() {
        // Closed-interval semantics: same-day handover is a conflict.
        let r = rental(date(2025, 1, 10), date(2025, 1, 15));
        assert!(r.overlaps_range(date(2025, 1, 15), date(2025, 1, 20)));
        assert!(r.overlaps_range(date(2025, 1, 5), date(2025, 1, 10)));
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        let r = rental(date(2025, 1, 10), date(2025, 1, 15));
        assert!(!r.overlaps_range(date(2025, 1, 16), date(2025, 1, 20)));
        assert!(!r.overlaps_range(date(2025, 1, 1), date(2025, 1, 9)));
    }

    #[test]
    fn test_effective_status_past_end_date() {
        let r = rental(date(2025, 1, 10), date(2025, 1, 15));
        assert_eq!(r.effective_status(date(2025, 1, 15)), RentalStatus::Confirmed);
        assert_eq!(r.effective_status(date(2025, 1, 16)), RentalStatus::Finished);
    }

    #[test]
    fn test_effective_status_never_reverts() {
        let mut r = rental(date(2025, 1, 10), date(2025, 1, 15));
        r.finish();
        assert_eq!(r.effective_status(date(2025, 1, 1)), RentalStatus::Finished);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut r = rental(date(2025, 1, 10), date(2025, 1, 15));
        r.finish();
        r.finish();
        assert_eq!(r.status, RentalStatus::Finished);
        assert!(!r.is_confirmed());
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(RentalStatus::parse("Confirmed"), Some(RentalStatus::Confirmed));
        assert_eq!(RentalStatus::parse(RentalStatus::Finished.as_str()), Some(RentalStatus::Finished));
        assert_eq!(RentalStatus::parse("cancelled"), None);
        assert_eq!(YearlyInclusion::parse("Excluded"), Some(YearlyInclusion::Excluded));
    }
}
