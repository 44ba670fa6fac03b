//! Handler for POST /api/v1/auth/register.

use actix_web::{web, HttpResponse};
use validator::Validate;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{AuthResponse, RegisterRequest};
use crate::handlers::{domain_error_to_response, validation_error_response};

/// Register a new account and return its access token
pub async fn register<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    request: web::Json<RegisterRequest>,
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
        .auth_service
        .register(&request.name, &request.email, &request.tel, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Created().json(ApiResponse::success(AuthResponse {
            token: outcome.token,
            user: outcome.user,
        })),
        Err(e) => domain_error_to_response(&e),
    }
}
