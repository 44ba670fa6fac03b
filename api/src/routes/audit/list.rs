//! Handler for GET /api/v1/audit-logs (admin).

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_shared::types::response::ApiResponse;

use crate::app::AppState;
use crate::handlers::domain_error_to_response;
use crate::middleware::AuthContext;

const DEFAULT_LIMIT: usize = 100;

/// Query parameters for the audit listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    /// Maximum number of records to return (default 100)
    pub limit: Option<usize>,
    /// Restrict to one target collection, e.g. "rentals"
    pub target: Option<String>,
}

/// List recent audit records, newest first
pub async fn list<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
    query: web::Query<AuditQuery>,
    auth: AuthContext,
) -> HttpResponse
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    if !auth.is_admin() {
        return HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error_with_code("Admin role required", "FORBIDDEN"));
    }

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let result = match &query.target {
        Some(target) => state.audit_service.for_target(target, limit).await,
        None => state.audit_service.recent(limit).await,
    };

    match result {
        Ok(logs) => HttpResponse::Ok().json(ApiResponse::success(logs)),
        Err(e) => domain_error_to_response(&e),
    }
}
