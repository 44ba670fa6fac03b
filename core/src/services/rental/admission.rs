//! Admission policy: date-order validity and the concurrent-rental cap.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::rental::RentalStatus;
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainResult, RentalError};
use crate::repositories::RentalRepository;

/// Gatekeeper consulted before a rental may be created
pub struct AdmissionPolicy<R>
where
    R: RentalRepository,
{
    rental_repository: Arc<R>,
    max_active: usize,
}

impl<R> AdmissionPolicy<R>
where
    R: RentalRepository,
{
    /// Create a new admission policy with the given cap
    pub fn new(rental_repository: Arc<R>, max_active: usize) -> Self {
        Self {
            rental_repository,
            max_active,
        }
    }

    /// The configured concurrent-rental cap
    pub fn max_active(&self) -> usize {
        self.max_active
    }

    /// Validate the date order of a requested range
    pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), RentalError> {
        if start > end {
            return Err(RentalError::InvalidDateRange { start, end });
        }
        Ok(())
    }

    /// Whether a user may take on one more rental
    ///
    /// Only `Confirmed` rentals count toward the cap; `Finished` ones do
    /// not. Admins are exempt. The count and the subsequent insert are
    /// not one atomic step; a user racing themselves can exceed the cap
    /// by one, same as the original system.
    pub async fn can_admit(&self, user_id: Uuid, role: UserRole) -> DomainResult<bool> {
        if role == UserRole::Admin {
            return Ok(true);
        }

        let active = self
            .rental_repository
            .count_by_user_and_status(user_id, RentalStatus::Confirmed)
            .await?;
        Ok((active as usize) < self.max_active)
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

    async fn seed_rentals(repo: &MockRentalRepository, user_id: Uuid, confirmed: usize, finished: usize) {
        // Spread the ranges out so they never collide with each other.
        for i in 0..(confirmed + finished) {
            let start = date(2025, 1, 1) + chrono::Duration::days(i as i64 * 10);
            let end = start + chrono::Duration::days(3);
            let mut rental =
                Rental::new(Uuid::new_v4(), user_id, start, end, 4, 400.0, 0.0);
            if i >= confirmed {
                rental.finish();
            }
            repo.seed(rental).await;
        }
    }

    #[test]
    fn test_validate_range() {
        assert!(AdmissionPolicy::<MockRentalRepository>::validate_range(
            date(2025, 1, 10),
            date(2025, 1, 10)
        )
        .is_ok());
        let err = AdmissionPolicy::<MockRentalRepository>::validate_range(
            date(2025, 1, 11),
            date(2025, 1, 10),
        )
        .unwrap_err();
        assert!(matches!(err, RentalError::InvalidDateRange { .. }));
    }

    #[tokio::test]
    async fn test_cap_blocks_fourth_rental() {
        let repo = Arc::new(MockRentalRepository::new());
        let policy = AdmissionPolicy::new(Arc::clone(&repo), 3);
        let user = Uuid::new_v4();

        seed_rentals(&repo, user, 2, 0).await;
        assert!(policy.can_admit(user, UserRole::User).await.unwrap());

        seed_rentals(&repo, user, 1, 0).await;
        assert!(!policy.can_admit(user, UserRole::User).await.unwrap());
    }

    #[tokio::test]
    async fn test_finished_rentals_do_not_count() {
        let repo = Arc::new(MockRentalRepository::new());
        let policy = AdmissionPolicy::new(Arc::clone(&repo), 3);
        let user = Uuid::new_v4();

        seed_rentals(&repo, user, 2, 5).await;
        assert!(policy.can_admit(user, UserRole::User).await.unwrap());
    }

    #[tokio::test]
    async fn test_admin_is_exempt() {
        let repo = Arc::new(MockRentalRepository::new());
        let policy = AdmissionPolicy::new(Arc::clone(&repo), 3);
        let admin = Uuid::new_v4();

        seed_rentals(&repo, admin, 10, 0).await;
        assert!(policy.can_admit(admin, UserRole::Admin).await.unwrap());
    }
}
