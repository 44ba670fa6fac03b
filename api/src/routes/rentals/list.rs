//! Handler for GET /api/v1/rentals.

use actix_web::{web, HttpResponse};

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::domain_error_to_response;
use crate::middleware::AuthContext;

use super::actor;

/// List rentals visible to the caller
///
/// Plain users get their own bookings; admins get all of them.
pub async fn list<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    auth: AuthContext,
) -> HttpResponse
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    match state.rental_service.list_rentals(&actor(&auth), None).await {
        Ok(rentals) => HttpResponse::Ok().json(ApiResponse::success(rentals)),
        Err(e) => domain_error_to_response(&e),
    }
}
