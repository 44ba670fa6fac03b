//! Application state and factory.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use rw_core::repositories::{
    AuditLogRepository, CarRepository, RentalRepository, UserRepository,
};
use rw_core::services::auth::TokenService;
use rw_core::services::{AuditService, AuthService, CarService, RentalService};
use rw_shared::types::response::ApiResponse;

use crate::middleware::JwtAuth;
use crate::routes::{audit, auth, cars, rentals};

/// Shared services handed to every route handler
pub struct AppState<R, C, U, A>
where
    R: RentalRepository,
    C: CarRepository,
    U: UserRepository,
    A: AuditLogRepository + 'static,
{
    pub auth_service: Arc<AuthService<U>>,
    pub token_service: Arc<TokenService>,
    pub rental_service: Arc<RentalService<R, C, U, A>>,
    pub car_service: Arc<CarService<R, C, U, A>>,
    pub audit_service: Arc<AuditService<A>>,
}

/// Create and configure the application with all routes mounted
///
/// Fully protected scopes sit behind [`JwtAuth`]; the cars scope mixes
/// public reads with protected writes, so its protected handlers resolve
/// the caller through the `AuthContext` extractor instead.
pub fn create_app<R, C, U, A>(
    state: web::Data<AppState<R, C, U, A>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: RentalRepository + 'static,
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    A: AuditLogRepository + 'static,
{
    let token_service = Arc::clone(&state.token_service);

    App::new()
        .app_data(state)
        .app_data(web::Data::new(Arc::clone(&token_service)))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::register::<R, C, U, A>))
                        .route("/login", web::post().to(auth::login::login::<R, C, U, A>))
                        .service(
                            web::resource("/me")
                                .wrap(JwtAuth::new(Arc::clone(&token_service)))
                                .route(web::get().to(auth::me::me::<R, C, U, A>)),
                        ),
                )
                .service(
                    web::scope("/rentals")
                        .wrap(JwtAuth::new(Arc::clone(&token_service)))
                        .route("", web::get().to(rentals::list::list::<R, C, U, A>))
                        .route("/finish/{id}", web::put().to(rentals::finish::finish::<R, C, U, A>))
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(rentals::get::get::<R, C, U, A>))
                                .route(web::put().to(rentals::update::update::<R, C, U, A>))
                                .route(web::delete().to(rentals::delete::delete::<R, C, U, A>)),
                        ),
                )
                .service(
                    web::scope("/cars")
                        .service(
                            web::resource("")
                                .route(web::get().to(cars::list::list::<R, C, U, A>))
                                .route(web::post().to(cars::create::create::<R, C, U, A>)),
                        )
                        .service(
                            web::resource("/{car_id}/rentals")
                                .route(web::get().to(rentals::list_for_car::list_for_car::<R, C, U, A>))
                                .route(web::post().to(rentals::create::create::<R, C, U, A>)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(cars::get::get::<R, C, U, A>))
                                .route(web::put().to(cars::update::update::<R, C, U, A>))
                                .route(web::delete().to(cars::delete::delete::<R, C, U, A>)),
                        ),
                )
                .service(
                    web::scope("/audit-logs")
                        .wrap(JwtAuth::new(token_service))
                        .route("", web::get().to(audit::list::list::<R, C, U, A>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "rentwheels-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error_with_code("Route not found", "NOT_FOUND"))
}
