//! RentWheels API server binary.
//!
//! Wires the MySQL repositories from `rw_infra` into the core services
//! and mounts all routes on an actix-web server.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rw_api::app::{create_app, AppState};
use rw_core::services::audit::{AuditService, AuditServiceConfig};
use rw_core::services::auth::{AuthService, AuthServiceConfig, TokenService};
use rw_core::services::rental::RentalServiceConfig;
use rw_core::services::{CarService, RentalService};
use rw_infra::{
    DatabasePool, MySqlAuditLogRepository, MySqlCarRepository, MySqlRentalRepository,
    MySqlUserRepository,
};
use rw_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    if config.auth.is_using_default_secret() {
        warn!("JWT_SECRET is unset, using the built-in development secret");
    }

    info!("Starting RentWheels API server");

    let db = DatabasePool::new(config.database.clone())
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    info!(pool = %db.statistics(), "connected to database");

    let rental_repository = Arc::new(MySqlRentalRepository::new(db.pool().clone()));
    let car_repository = Arc::new(MySqlCarRepository::new(db.pool().clone()));
    let user_repository = Arc::new(MySqlUserRepository::new(db.pool().clone()));
    let audit_repository = Arc::new(MySqlAuditLogRepository::new(db.pool().clone()));

    let token_service = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.issuer.clone(),
        config.auth.access_token_expiry,
    ));
    let audit_service = Arc::new(AuditService::new(
        Arc::clone(&audit_repository),
        AuditServiceConfig::default(),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&token_service),
        AuthServiceConfig {
            bcrypt_cost: config.auth.bcrypt_cost,
        },
    ));
    let rental_service = Arc::new(RentalService::with_audit(
        Arc::clone(&rental_repository),
        Arc::clone(&car_repository),
        Arc::clone(&user_repository),
        Arc::clone(&audit_service),
        RentalServiceConfig::default(),
    ));
    let car_service = Arc::new(CarService::with_audit(
        Arc::clone(&car_repository),
        Arc::clone(&rental_service),
        Arc::clone(&audit_service),
    ));

    let state = web::Data::new(AppState {
        auth_service,
        token_service,
        rental_service,
        car_service,
        audit_service,
    });

    let bind_address = config.server.bind_address();
    info!(%bind_address, "binding HTTP server");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .keep_alive(std::time::Duration::from_secs(config.server.keep_alive))
        .bind(bind_address)?
        .run()
        .await
}
