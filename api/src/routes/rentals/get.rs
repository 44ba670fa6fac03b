//! Handler for GET /api/v1/rentals/{id}.

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

/// Load one rental with its car and user fields
pub async fn get<R, C, U, A>(
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
    match state
        .rental_service
        .get_rental(path.into_inner(), &actor(&auth))
        .await
    {
        Ok(details) => HttpResponse::Ok().json(ApiResponse::success(details)),
        Err(e) => domain_error_to_response(&e),
    }
}
