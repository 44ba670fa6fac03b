//! Car DTOs.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use rw_core::services::car::{CreateCar, UpdateCar};

/// Request body for POST /api/v1/cars
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "vin_plate must be 1-64 characters"))]
    pub vin_plate: String,

    pub provider_id: Uuid,

    #[serde(default)]
    pub picture_url: String,

    #[validate(range(min = 1, max = 64, message = "capacity must be 1-64"))]
    pub capacity: u32,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0.01, message = "price_per_day must be positive"))]
    pub price_per_day: f64,
}

impl From<CreateCarRequest> for CreateCar {
    fn from(request: CreateCarRequest) -> Self {
        Self {
            name: request.name,
            vin_plate: request.vin_plate,
            provider_id: request.provider_id,
            picture_url: request.picture_url,
            capacity: request.capacity,
            description: request.description,
            price_per_day: request.price_per_day,
        }
    }
}

/// Request body for PUT /api/v1/cars/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCarRequest {
    pub name: Option<String>,
    pub picture_url: Option<String>,
    pub capacity: Option<u32>,
    pub description: Option<String>,
    pub price_per_day: Option<f64>,
}

impl From<UpdateCarRequest> for UpdateCar {
    fn from(request: UpdateCarRequest) -> Self {
        Self {
            name: request.name,
            picture_url: request.picture_url,
            capacity: request.capacity,
            description: request.description,
            price_per_day: request.price_per_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_car_rejects_zero_price() {
        let request = CreateCarRequest {
            name: "Toyota Vios".to_string(),
            vin_plate: "1HGBH41JXMN109186".to_string(),
            provider_id: Uuid::new_v4(),
            picture_url: String::new(),
            capacity: 4,
            description: String::new(),
            price_per_day: 0.0,
        };
        assert!(request.validate().is_err());
    }
}
