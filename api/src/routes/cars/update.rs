//! Handler for PUT /api/v1/cars/{id} (admin).

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_core::services::rental::Actor;
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::car::UpdateCarRequest;
use crate::handlers::domain_error_to_response;
use crate::middleware::AuthContext;

/// Update a car's listing fields
pub async fn update<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateCarRequest>,
    auth: AuthContext,
) -> HttpResponse
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let actor = Actor::new(auth.user_id, auth.role);
    match state
        .car_service
        .update_car(path.into_inner(), request.into_inner().into(), &actor)
        .await
    {
        Ok(car) => HttpResponse::Ok().json(ApiResponse::success(car)),
        Err(e) => domain_error_to_response(&e),
    }
}
