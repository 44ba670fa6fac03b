//! Handler for GET /api/v1/auth/me.

use actix_web::{web, HttpResponse};

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::domain_error_to_response;
use crate::middleware::AuthContext;

/// Return the authenticated caller's profile
pub async fn me<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    auth: AuthContext,
) -> HttpResponse
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    match state.auth_service.me(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(user)),
        Err(e) => domain_error_to_response(&e),
    }
}
