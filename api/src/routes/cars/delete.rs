//! Handler for DELETE /api/v1/cars/{id} (admin).

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_core::services::rental::Actor;
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::domain_error_to_response;
use crate::middleware::AuthContext;

/// Remove a car and cascade its rentals
pub async fn delete<R, C, U, A>(
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
    let actor = Actor::new(auth.user_id, auth.role);
    match state.car_service.delete_car(path.into_inner(), &actor).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Car deleted")),
        Err(e) => domain_error_to_response(&e),
    }
}
