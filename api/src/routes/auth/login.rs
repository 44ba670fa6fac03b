//! Handler for POST /api/v1/auth/login.

use actix_web::{web, HttpResponse};
use validator::Validate;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::{domain_error_to_response, validation_error_response};

/// Exchange email and password for an access token
pub async fn login<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    request: web::Json<LoginRequest>,
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

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(outcome) => HttpResponse::Ok().json(ApiResponse::success(AuthResponse {
            token: outcome.token,
            user: outcome.user,
        })),
        Err(e) => domain_error_to_response(&e),
    }
}
