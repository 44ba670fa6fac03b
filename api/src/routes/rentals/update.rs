//! Handler for PUT /api/v1/rentals/{id}.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::rental::UpdateRentalRequest;
use crate::handlers::{domain_error_to_response, validation_error_response};
use crate::middleware::AuthContext;

use super::actor;

/// Update a rental's car, dates, discount or yearly inclusion
pub async fn update<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateRentalRequest>,
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

    match state
        .rental_service
        .update_rental(path.into_inner(), request.into_inner().into(), &actor(&auth))
        .await
    {
        Ok(rental) => HttpResponse::Ok().json(ApiResponse::success(rental)),
        Err(e) => domain_error_to_response(&e),
    }
}
