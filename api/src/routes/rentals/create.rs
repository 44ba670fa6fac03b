//! Handler for POST /api/v1/cars/{car_id}/rentals.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::rental::CreateRentalRequest;
use crate::handlers::{domain_error_to_response, validation_error_response};
use crate::middleware::AuthContext;

use super::actor;

/// Book the car in the path for the requested date range
pub async fn create<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    path: web::Path<Uuid>,
    request: web::Json<CreateRentalRequest>,
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

    let car_id = path.into_inner();
    let command = request.into_inner().into_command(car_id);

    match state
        .rental_service
        .create_rental(command, &actor(&auth))
        .await
    {
        Ok(rental) => HttpResponse::Created().json(ApiResponse::success(rental)),
        Err(e) => domain_error_to_response(&e),
    }
}
