//! Handler for GET /api/v1/cars/{id} (public).

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::domain_error_to_response;

/// Load one car
pub async fn get<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    match state.car_service.get_car(path.into_inner()).await {
        Ok(car) => HttpResponse::Ok().json(ApiResponse::success(car)),
        Err(e) => domain_error_to_response(&e),
    }
}
