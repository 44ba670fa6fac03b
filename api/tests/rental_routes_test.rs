//! Route-level integration tests running the full app against the
//! in-memory repositories.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{json, Value};
use uuid::Uuid;

use rw_api::app::{create_app, AppState};
use rw_core::domain::entities::car::Car;
use rw_core::domain::entities::user::{User, UserRole};
use rw_core::repositories::{
    CarRepository, MockAuditLogRepository, MockCarRepository, MockRentalRepository,
    MockUserRepository, UserRepository,
};
use rw_core::services::audit::{AuditService, AuditServiceConfig};
use rw_core::services::auth::{AuthService, AuthServiceConfig, TokenService};
use rw_core::services::rental::RentalServiceConfig;
use rw_core::services::{CarService, RentalService};

type TestState =
    AppState<MockRentalRepository, MockCarRepository, MockUserRepository, MockAuditLogRepository>;

struct TestContext {
    state: web::Data<TestState>,
    cars: Arc<MockCarRepository>,
    users: Arc<MockUserRepository>,
}

fn test_context() -> TestContext {
    let rentals = Arc::new(MockRentalRepository::new());
    let cars = Arc::new(MockCarRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let audit = Arc::new(MockAuditLogRepository::new());

    let token_service = Arc::new(TokenService::new("test-secret", "rentwheels", 3600));
    let audit_service = Arc::new(AuditService::new(
        Arc::clone(&audit),
        AuditServiceConfig { async_writes: false },
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        Arc::clone(&token_service),
        AuthServiceConfig { bcrypt_cost: 4 },
    ));
    let rental_service = Arc::new(RentalService::with_audit(
        rentals,
        Arc::clone(&cars),
        Arc::clone(&users),
        Arc::clone(&audit_service),
        RentalServiceConfig::default(),
    ));
    let car_service = Arc::new(CarService::with_audit(
        Arc::clone(&cars),
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

    TestContext { state, cars, users }
}

async fn seed_user(ctx: &TestContext, role: UserRole) -> (User, String) {
    let email = format!("{}@example.com", Uuid::new_v4());
    let user = ctx
        .users
        .create(User::new("Somchai", email, "0811111111", "$2b$hash", role))
        .await
        .unwrap();
    let token = ctx.state.token_service.issue(user.id, user.role).unwrap();
    (user, token)
}

async fn seed_car(ctx: &TestContext, price_per_day: f64) -> Car {
    ctx.cars
        .create(Car::new(
            "Toyota Vios",
            format!("VIN-{}", Uuid::new_v4()),
            Uuid::new_v4(),
            price_per_day,
        ))
        .await
        .unwrap()
}

fn booking_body() -> Value {
    json!({
        "start_date": "2026-09-01",
        "end_date": "2026-09-05",
        "discount": 10.0
    })
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/health").to_request())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_register_then_login() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let register = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "tel": "0811111111",
            "password": "super-secret-pw"
        }))
        .to_request();
    let response = test::call_service(&app, register).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let login = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({
            "email": "alice@example.com",
            "password": "super-secret-pw"
        }))
        .to_request();
    let response = test::call_service(&app, login).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["data"]["token"].is_string());
    // The password hash must never leak
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_create_rental_requires_token() {
    let ctx = test_context();
    let car = seed_car(&ctx, 400.0).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let request = test::TestRequest::post()
        .uri(&format!("/api/v1/cars/{}/rentals", car.id))
        .set_json(booking_body())
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_create_rental_succeeds_and_prices() {
    let ctx = test_context();
    let (_, token) = seed_user(&ctx, UserRole::User).await;
    let car = seed_car(&ctx, 400.0).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let request = test::TestRequest::post()
        .uri(&format!("/api/v1/cars/{}/rentals", car.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(booking_body())
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    // 5 inclusive days at 400/day, 10% discount capped at 100
    assert_eq!(body["data"]["total_days"], json!(5));
    assert_eq!(body["data"]["total_price"], json!(1900.0));
}

#[actix_rt::test]
async fn test_overlapping_booking_returns_conflict() {
    let ctx = test_context();
    let (_, token) = seed_user(&ctx, UserRole::User).await;
    let car = seed_car(&ctx, 400.0).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let first = test::TestRequest::post()
        .uri(&format!("/api/v1/cars/{}/rentals", car.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(booking_body())
        .to_request();
    assert_eq!(
        test::call_service(&app, first).await.status(),
        StatusCode::CREATED
    );

    // Touches the first range's end day
    let second = test::TestRequest::post()
        .uri(&format!("/api/v1/cars/{}/rentals", car.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({
            "start_date": "2026-09-05",
            "end_date": "2026-09-08"
        }))
        .to_request();
    let response = test::call_service(&app, second).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_fourth_active_rental_returns_conflict() {
    let ctx = test_context();
    let (_, token) = seed_user(&ctx, UserRole::User).await;
    let car = seed_car(&ctx, 400.0).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for (start, end) in [
        ("2026-09-01", "2026-09-02"),
        ("2026-09-04", "2026-09-05"),
        ("2026-09-07", "2026-09-08"),
    ] {
        let request = test::TestRequest::post()
            .uri(&format!("/api/v1/cars/{}/rentals", car.id))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "start_date": start, "end_date": end }))
            .to_request();
        assert_eq!(
            test::call_service(&app, request).await.status(),
            StatusCode::CREATED
        );
    }

    let request = test::TestRequest::post()
        .uri(&format!("/api/v1/cars/{}/rentals", car.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "start_date": "2026-09-10", "end_date": "2026-09-11" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_inverted_range_returns_bad_request() {
    let ctx = test_context();
    let (_, token) = seed_user(&ctx, UserRole::User).await;
    let car = seed_car(&ctx, 400.0).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let request = test::TestRequest::post()
        .uri(&format!("/api/v1/cars/{}/rentals", car.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "start_date": "2026-09-05", "end_date": "2026-09-01" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_list_rentals_scoped_to_caller() {
    let ctx = test_context();
    let (_, alice_token) = seed_user(&ctx, UserRole::User).await;
    let (_, bob_token) = seed_user(&ctx, UserRole::User).await;
    let car = seed_car(&ctx, 400.0).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let request = test::TestRequest::post()
        .uri(&format!("/api/v1/cars/{}/rentals", car.id))
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .set_json(booking_body())
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::CREATED
    );

    let request = test::TestRequest::get()
        .uri("/api/v1/rentals")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
async fn test_cars_browsing_is_public_but_mutation_needs_admin() {
    let ctx = test_context();
    let (_, user_token) = seed_user(&ctx, UserRole::User).await;
    seed_car(&ctx, 400.0).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/api/v1/cars").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let create = test::TestRequest::post()
        .uri("/api/v1/cars")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .set_json(json!({
            "name": "Honda City",
            "vin_plate": "2HGBH41JXMN109187",
            "provider_id": Uuid::new_v4(),
            "capacity": 4,
            "price_per_day": 350.0
        }))
        .to_request();
    let response = test::call_service(&app, create).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_admin_can_create_car() {
    let ctx = test_context();
    let (_, admin_token) = seed_user(&ctx, UserRole::Admin).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let create = test::TestRequest::post()
        .uri("/api/v1/cars")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({
            "name": "Honda City",
            "vin_plate": "2HGBH41JXMN109187",
            "provider_id": Uuid::new_v4(),
            "capacity": 4,
            "price_per_day": 350.0
        }))
        .to_request();
    let response = test::call_service(&app, create).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn test_audit_listing_requires_admin() {
    let ctx = test_context();
    let (_, user_token) = seed_user(&ctx, UserRole::User).await;
    let (_, admin_token) = seed_user(&ctx, UserRole::Admin).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let request = test::TestRequest::get()
        .uri("/api/v1/audit-logs")
        .insert_header(("Authorization", format!("Bearer {}", user_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::FORBIDDEN
    );

    let request = test::TestRequest::get()
        .uri("/api/v1/audit-logs")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, request).await.status(),
        StatusCode::OK
    );
}

#[actix_rt::test]
async fn test_finish_rental_round_trip() {
    let ctx = test_context();
    let (_, token) = seed_user(&ctx, UserRole::User).await;
    let car = seed_car(&ctx, 400.0).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let request = test::TestRequest::post()
        .uri(&format!("/api/v1/cars/{}/rentals", car.id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(booking_body())
        .to_request();
    let response = test::call_service(&app, request).await;
    let body: Value = test::read_body_json(response).await;
    let rental_id = body["data"]["id"].as_str().unwrap().to_string();

    let request = test::TestRequest::put()
        .uri(&format!("/api/v1/rentals/finish/{}", rental_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["status"], json!("Finished"));
}
