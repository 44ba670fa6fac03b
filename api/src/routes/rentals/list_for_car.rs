//! Handler for GET /api/v1/cars/{car_id}/rentals.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::domain_error_to_response;
use crate::middleware::AuthContext;

use super::actor;

/// List every rental of one car
pub async fn list_for_car<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    path: web::Path<Uuid>,
    auth: AuthContext,
) -> HttpResponse
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let car_id = path.into_inner();

    match state
        .rental_service
        .list_rentals(&actor(&auth), Some(car_id))
        .await
    {
        Ok(rentals) => HttpResponse::Ok().json(ApiResponse::success(rentals)),
        Err(e) => domain_error_to_response(&e),
    }
}
