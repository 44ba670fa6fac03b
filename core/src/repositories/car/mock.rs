//! Mock implementation of CarRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::car::Car;
use crate::errors::DomainError;

use super::r#trait::CarRepository;

/// Mock car repository for testing
pub struct MockCarRepository {
    cars: Arc<RwLock<HashMap<Uuid, Car>>>,
}

impl MockCarRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            cars: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockCarRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarRepository for MockCarRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, DomainError> {
        let cars = self.cars.read().await;
        Ok(cars.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Car>, DomainError> {
        let cars = self.cars.read().await;
        Ok(cars.values().cloned().collect())
    }

    async fn find_by_vin(&self, vin_plate: &str) -> Result<Option<Car>, DomainError> {
        let cars = self.cars.read().await;
        Ok(cars.values().find(|c| c.vin_plate == vin_plate).cloned())
    }

    async fn create(&self, car: Car) -> Result<Car, DomainError> {
        let mut cars = self.cars.write().await;

        if cars.values().any(|c| c.vin_plate == car.vin_plate) {
            return Err(DomainError::Validation {
                message: format!("Car with VIN {} is already registered", car.vin_plate),
            });
        }

        cars.insert(car.id, car.clone());
        Ok(car)
    }

    async fn update(&self, car: Car) -> Result<Car, DomainError> {
        let mut cars = self.cars.write().await;

        if !cars.contains_key(&car.id) {
            return Err(DomainError::not_found("Car"));
        }

        cars.insert(car.id, car.clone());
        Ok(car)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut cars = self.cars.write().await;
        Ok(cars.remove(&id).is_some())
    }
}
