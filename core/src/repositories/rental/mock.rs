//! Mock implementation of RentalRepository for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::rental::{Rental, RentalStatus};
use crate::errors::{DomainError, RentalError};

use super::r#trait::RentalRepository;

/// Mock rental repository for testing
///
/// Like the MySQL implementation, `create` performs its overlap check and
/// the insert under one write lock, so the storage-level backstop against
/// double-booking holds in tests too.
pub struct MockRentalRepository {
    rentals: Arc<RwLock<HashMap<Uuid, Rental>>>,
}

impl MockRentalRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            rentals: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a rental directly, bypassing the overlap guard (test setup)
    pub async fn seed(&self, rental: Rental) {
        self.rentals.write().await.insert(rental.id, rental);
    }
}

impl Default for MockRentalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(mut rentals: Vec<Rental>) -> Vec<Rental> {
    rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rentals
}

#[async_trait]
impl RentalRepository for MockRentalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError> {
        let rentals = self.rentals.read().await;
        Ok(rentals.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Rental>, DomainError> {
        let rentals = self.rentals.read().await;
        Ok(newest_first(rentals.values().cloned().collect()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Rental>, DomainError> {
        let rentals = self.rentals.read().await;
        Ok(newest_first(
            rentals.values().filter(|r| r.user_id == user_id).cloned().collect(),
        ))
    }

    async fn find_by_car(&self, car_id: Uuid) -> Result<Vec<Rental>, DomainError> {
        let rentals = self.rentals.read().await;
        Ok(newest_first(
            rentals.values().filter(|r| r.car_id == car_id).cloned().collect(),
        ))
    }

    async fn find_overlapping(
        &self,
        car_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Rental>, DomainError> {
        let rentals = self.rentals.read().await;
        Ok(rentals
            .values()
            .filter(|r| {
                r.car_id == car_id
                    && Some(r.id) != exclude
                    && r.overlaps_range(start, end)
            })
            .cloned()
            .collect())
    }

    async fn count_by_user_and_status(
        &self,
        user_id: Uuid,
        status: RentalStatus,
    ) -> Result<u64, DomainError> {
        let rentals = self.rentals.read().await;
        Ok(rentals
            .values()
            .filter(|r| r.user_id == user_id && r.status == status)
            .count() as u64)
    }

    async fn create(&self, rental: Rental) -> Result<Rental, DomainError> {
        let mut rentals = self.rentals.write().await;

        // Guarded insert: re-check overlap while holding the write lock.
        let conflict = rentals.values().any(|r| {
            r.car_id == rental.car_id
                && r.overlaps_range(rental.start_date, rental.end_date)
        });
        if conflict {
            return Err(RentalError::BookingConflict.into());
        }

        rentals.insert(rental.id, rental.clone());
        Ok(rental)
    }

    async fn update(&self, rental: Rental) -> Result<Rental, DomainError> {
        let mut rentals = self.rentals.write().await;

        if !rentals.contains_key(&rental.id) {
            return Err(DomainError::not_found("Rental"));
        }

        rentals.insert(rental.id, rental.clone());
        Ok(rental)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rentals = self.rentals.write().await;
        Ok(rentals.remove(&id).is_some())
    }

    async fn finish_expired(&self, today: NaiveDate) -> Result<u64, DomainError> {
        let mut rentals = self.rentals.write().await;
        let mut transitioned = 0;
        for rental in rentals.values_mut() {
            if rental.status == RentalStatus::Confirmed && rental.end_date < today {
                rental.finish();
                transitioned += 1;
            }
        }
        Ok(transitioned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rental_for(car_id: Uuid, start: NaiveDate, end: NaiveDate) -> Rental {
        Rental::new(car_id, Uuid::new_v4(), start, end, 1, 100.0, 0.0)
    }

    #[tokio::test]
    async fn test_create_rejects_overlap() {
        let repo = MockRentalRepository::new();
        let car = Uuid::new_v4();

        repo.create(rental_for(car, date(2025, 1, 10), date(2025, 1, 15)))
            .await
            .unwrap();

        let err = repo
            .create(rental_for(car, date(2025, 1, 12), date(2025, 1, 20)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Rental(RentalError::BookingConflict)
        ));

        // A different car with the same dates is fine.
        repo.create(rental_for(Uuid::new_v4(), date(2025, 1, 12), date(2025, 1, 20)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_overlapping_excludes_given_id() {
        let repo = MockRentalRepository::new();
        let car = Uuid::new_v4();
        let existing = repo
            .create(rental_for(car, date(2025, 1, 10), date(2025, 1, 15)))
            .await
            .unwrap();

        let hits = repo
            .find_overlapping(car, date(2025, 1, 12), date(2025, 1, 20), Some(existing.id))
            .await
            .unwrap();
        assert!(hits.is_empty());

        let hits = repo
            .find_overlapping(car, date(2025, 1, 12), date(2025, 1, 20), None)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_finish_expired_sweep() {
        let repo = MockRentalRepository::new();
        let car = Uuid::new_v4();
        let old = repo
            .create(rental_for(car, date(2025, 1, 1), date(2025, 1, 5)))
            .await
            .unwrap();
        let current = repo
            .create(rental_for(car, date(2025, 1, 10), date(2025, 1, 15)))
            .await
            .unwrap();

        let transitioned = repo.finish_expired(date(2025, 1, 12)).await.unwrap();
        assert_eq!(transitioned, 1);

        let old = repo.find_by_id(old.id).await.unwrap().unwrap();
        assert_eq!(old.status, RentalStatus::Finished);
        let current = repo.find_by_id(current.id).await.unwrap().unwrap();
        assert_eq!(current.status, RentalStatus::Confirmed);

        // Running the sweep again is a no-op.
        assert_eq!(repo.finish_expired(date(2025, 1, 12)).await.unwrap(), 0);
    }
}
