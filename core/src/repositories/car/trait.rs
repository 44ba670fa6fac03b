//! Car repository trait defining the interface for car persistence.
//!
//! From the booking core's perspective cars are read-mostly: the rental
//! lifecycle only ever reads `price_per_day`. The write operations back
//! the fleet-management endpoints.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::car::Car;
use crate::errors::DomainError;

/// Repository trait for Car entity persistence operations
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Find a car by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, DomainError>;

    /// List every car
    async fn find_all(&self) -> Result<Vec<Car>, DomainError>;

    /// Find a car by its VIN plate
    ///
    /// VIN plates are unique; used to reject duplicate registrations.
    async fn find_by_vin(&self, vin_plate: &str) -> Result<Option<Car>, DomainError>;

    /// Persist a new car
    async fn create(&self, car: Car) -> Result<Car, DomainError>;

    /// Update an existing car
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No car with the given ID
    async fn update(&self, car: Car) -> Result<Car, DomainError>;

    /// Delete a car
    ///
    /// Callers must delete the car's rentals first (the cascade is
    /// orchestrated by the car service, not the store).
    ///
    /// # Returns
    /// * `Ok(true)` - Car was deleted
    /// * `Ok(false)` - Car not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
