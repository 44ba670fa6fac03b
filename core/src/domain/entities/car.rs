//! Car entity: a rentable vehicle owned by a provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vehicle available for rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Unique identifier for the car
    pub id: Uuid,

    /// Display name (make/model)
    pub name: String,

    /// VIN plate, unique across the fleet
    pub vin_plate: String,

    /// Provider that owns the car
    pub provider_id: Uuid,

    /// Picture URL
    pub picture_url: String,

    /// Passenger capacity
    pub capacity: u32,

    /// Free-text description
    pub description: String,

    /// Daily rental price, always positive
    pub price_per_day: f64,

    /// Average user rating (1-5), absent until first rated
    pub average_rating: Option<f64>,

    /// Timestamp when the car was registered
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Creates a new car
    pub fn new(
        name: impl Into<String>,
        vin_plate: impl Into<String>,
        provider_id: Uuid,
        price_per_day: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            vin_plate: vin_plate.into(),
            provider_id,
            picture_url: String::new(),
            capacity: 4,
            description: String::new(),
            price_per_day,
            average_rating: None,
            created_at: Utc::now(),
        }
    }

    /// Set the picture URL
    pub fn with_picture(mut self, url: impl Into<String>) -> Self {
        self.picture_url = url.into();
        self
    }

    /// Set capacity and description
    pub fn with_details(mut self, capacity: u32, description: impl Into<String>) -> Self {
        self.capacity = capacity;
        self.description = description.into();
        self
    }
}
