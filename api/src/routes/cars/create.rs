//! Handler for POST /api/v1/cars (admin).

use actix_web::{web, HttpResponse};
use validator::Validate;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_core::services::rental::Actor;
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::car::CreateCarRequest;
use crate::handlers::{domain_error_to_response, validation_error_response};
use crate::middleware::AuthContext;

/// Register a new car in the fleet
pub async fn create<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    request: web::Json<CreateCarRequest>,
    auth: AuthContext,
) -> HttpResponse
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let actor = Actor::new(auth.user_id, auth.role);
    match state
        .car_service
        .create_car(request.into_inner().into(), &actor)
        .await
    {
        Ok(car) => HttpResponse::Created().json(ApiResponse::success(car)),
        Err(e) => domain_error_to_response(&e),
    }
}
