//! Car availability over date ranges.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::repositories::RentalRepository;

/// Read-only overlap checks against the rental store
///
/// Closed-interval semantics throughout: two bookings that share even a
/// single boundary day conflict, so same-day handover is disallowed.
pub struct AvailabilityChecker<R>
where
    R: RentalRepository,
{
    rental_repository: Arc<R>,
}

impl<R> AvailabilityChecker<R>
where
    R: RentalRepository,
{
    /// Create a new availability checker
    pub fn new(rental_repository: Arc<R>) -> Self {
        Self { rental_repository }
    }

    /// Whether any stored rental of `car_id` intersects `[start, end]`
    ///
    /// # Arguments
    /// * `exclude` - Rental ID to ignore, for update-in-place checks
    ///   against the rental's own row
    pub async fn has_overlap(
        &self,
        car_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> DomainResult<bool> {
        let overlapping = self
            .rental_repository
            .find_overlapping(car_id, start, end, exclude)
            .await?;
        Ok(!overlapping.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::rental::Rental;
    use crate::repositories::MockRentalRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_overlap_detection() {
        let repo = Arc::new(MockRentalRepository::new());
        let checker = AvailabilityChecker::new(Arc::clone(&repo));
        let car = Uuid::new_v4();

        let existing = Rental::new(
            car,
            Uuid::new_v4(),
            date(2025, 1, 10),
            date(2025, 1, 15),
            6,
            540.0,
            10.0,
        );
        repo.seed(existing.clone()).await;

        assert!(checker
            .has_overlap(car, date(2025, 1, 12), date(2025, 1, 20), None)
            .await
            .unwrap());
        // Touching boundary conflicts.
        assert!(checker
            .has_overlap(car, date(2025, 1, 15), date(2025, 1, 20), None)
            .await
            .unwrap());
        // Disjoint range is free.
        assert!(!checker
            .has_overlap(car, date(2025, 1, 16), date(2025, 1, 20), None)
            .await
            .unwrap());
        // Excluding the conflicting rental itself clears the check.
        assert!(!checker
            .has_overlap(car, date(2025, 1, 12), date(2025, 1, 20), Some(existing.id))
            .await
            .unwrap());
        // Another car is unaffected.
        assert!(!checker
            .has_overlap(Uuid::new_v4(), date(2025, 1, 12), date(2025, 1, 20), None)
            .await
            .unwrap());
    }
}
