//! Rental repository trait defining the interface for rental persistence.
//!
//! This is the contended collection of the whole system: it is read for
//! overlap and cap checks and written on every lifecycle operation. The
//! `create` contract carries the storage-level overlap backstop.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::rental::{Rental, RentalStatus};
use crate::errors::DomainError;

/// Repository trait for Rental entity persistence operations
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Find a rental by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Rental))` - Rental found
    /// * `Ok(None)` - No rental with the given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError>;

    /// List every rental, newest first
    async fn find_all(&self) -> Result<Vec<Rental>, DomainError>;

    /// List all rentals booked by a user, newest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Rental>, DomainError>;

    /// List all rentals of a car, newest first
    async fn find_by_car(&self, car_id: Uuid) -> Result<Vec<Rental>, DomainError>;

    /// Find rentals of `car_id` whose closed date interval intersects
    /// `[start, end]`
    ///
    /// # Arguments
    /// * `exclude` - Rental ID to leave out of the search, used for
    ///   update-in-place checks against the rental's own row
    async fn find_overlapping(
        &self,
        car_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Rental>, DomainError>;

    /// Count a user's rentals in the given status
    ///
    /// Used by the admission policy: only `Confirmed` rentals count
    /// toward the concurrent-rental cap.
    async fn count_by_user_and_status(
        &self,
        user_id: Uuid,
        status: RentalStatus,
    ) -> Result<u64, DomainError>;

    /// Persist a new rental
    ///
    /// Implementations must make the overlap check and the insert one
    /// atomic step (a guarded insert), so that two concurrent creates for
    /// the same car and intersecting ranges cannot both succeed.
    ///
    /// # Returns
    /// * `Ok(Rental)` - The created rental
    /// * `Err(DomainError::Rental(BookingConflict))` - An overlapping
    ///   rental for the same car already exists
    async fn create(&self, rental: Rental) -> Result<Rental, DomainError>;

    /// Update an existing rental
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No rental with the given ID
    async fn update(&self, rental: Rental) -> Result<Rental, DomainError>;

    /// Delete a rental
    ///
    /// # Returns
    /// * `Ok(true)` - Rental was deleted
    /// * `Ok(false)` - Rental not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Bulk-transition every `Confirmed` rental whose end date is before
    /// `today` to `Finished`
    ///
    /// Idempotent housekeeping sweep run before list reads.
    ///
    /// # Returns
    /// * Number of rentals transitioned
    async fn finish_expired(&self, today: NaiveDate) -> Result<u64, DomainError>;
}
