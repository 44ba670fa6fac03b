//! Rental DTOs.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use rw_core::domain::entities::rental::YearlyInclusion;
use rw_core::services::rental::{CreateRental, UpdateRental};

/// Request body for POST /api/v1/cars/{car_id}/rentals
///
/// The car comes from the path, not the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRentalRequest {
    /// Book on behalf of another user; defaults to the caller
    pub user_id: Option<Uuid>,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(range(min = 0.0, max = 100.0, message = "discount must be 0-100"))]
    #[serde(default)]
    pub discount: f64,

    pub coupon_name: Option<String>,

    pub max_discount: Option<f64>,
}

impl CreateRentalRequest {
    /// Combine with the path car ID into the core command
    pub fn into_command(self, car_id: Uuid) -> CreateRental {
        CreateRental {
            car_id,
            user_id: self.user_id,
            start_date: self.start_date,
            end_date: self.end_date,
            discount: self.discount,
            coupon_name: self.coupon_name,
            max_discount: self.max_discount,
        }
    }
}

/// Request body for PUT /api/v1/rentals/{id}
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRentalRequest {
    pub car_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0.0, max = 100.0, message = "discount must be 0-100"))]
    pub discount: Option<f64>,
    pub inclusion: Option<YearlyInclusion>,
}

impl From<UpdateRentalRequest> for UpdateRental {
    fn from(request: UpdateRentalRequest) -> Self {
        Self {
            car_id: request.car_id,
            start_date: request.start_date,
            end_date: request.end_date,
            discount: request.discount,
            inclusion: request.inclusion,
        }
    }
}
