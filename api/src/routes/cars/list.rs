//! Handler for GET /api/v1/cars (public).

use actix_web::{web, HttpResponse};

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::domain_error_to_response;

/// List every car in the fleet
pub async fn list<R, C, U, A>(state: web::Data<AppState<R, C, U, A>>) -> HttpResponse
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    match state.car_service.list_cars().await {
        Ok(cars) => HttpResponse::Ok().json(ApiResponse::success(cars)),
        Err(e) => domain_error_to_response(&e),
    }
}
