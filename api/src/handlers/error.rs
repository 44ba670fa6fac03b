//! Mapping from domain errors to HTTP responses.
//!
//! Every error leaves the API in the shared response envelope with a
//! stable machine-readable code. Internal errors are logged with their
//! detail but reported to the client as an opaque message.

use actix_web::HttpResponse;
use tracing::error;
use validator::ValidationErrors;

use rw_core::errors::{AuthError, DomainError, RentalError};
use rw_shared::types::response::ApiResponse;

/// Build the HTTP response for a domain error
pub fn domain_error_to_response(err: &DomainError) -> HttpResponse {
    match err {
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_with_code(message.clone(), "VALIDATION_ERROR")),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(
            ApiResponse::<()>::error_with_code(format!("{} not found", resource), "NOT_FOUND"),
        ),
        DomainError::Unauthorized => HttpResponse::Forbidden().json(
            ApiResponse::<()>::error_with_code("You may not manage this resource", "FORBIDDEN"),
        ),
        DomainError::Rental(rental) => rental_error_to_response(rental),
        DomainError::Auth(auth) => auth_error_to_response(auth),
        DomainError::Internal { message } => {
            error!(detail = %message, "internal error");
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_with_code(
                "Internal server error",
                "INTERNAL_ERROR",
            ))
        }
    }
}

fn rental_error_to_response(err: &RentalError) -> HttpResponse {
    match err {
        RentalError::InvalidDateRange { .. } => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_with_code(err.to_string(), "INVALID_DATE_RANGE")),
        RentalError::BookingConflict => HttpResponse::Conflict()
            .json(ApiResponse::<()>::error_with_code(err.to_string(), "BOOKING_CONFLICT")),
        RentalError::RentalLimitExceeded { .. } => HttpResponse::Conflict().json(
            ApiResponse::<()>::error_with_code(err.to_string(), "RENTAL_LIMIT_EXCEEDED"),
        ),
    }
}

fn auth_error_to_response(err: &AuthError) -> HttpResponse {
    match err {
        AuthError::InvalidCredentials => HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error_with_code(err.to_string(), "INVALID_CREDENTIALS")),
        AuthError::EmailAlreadyRegistered => HttpResponse::Conflict().json(
            ApiResponse::<()>::error_with_code(err.to_string(), "EMAIL_ALREADY_REGISTERED"),
        ),
        AuthError::InvalidToken => HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error_with_code(err.to_string(), "INVALID_TOKEN")),
        AuthError::TokenExpired => HttpResponse::Unauthorized()
            .json(ApiResponse::<()>::error_with_code(err.to_string(), "TOKEN_EXPIRED")),
    }
}

/// Build a 400 response from request body validation failures
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let detail = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ");

    HttpResponse::BadRequest()
        .json(ApiResponse::<()>::error_with_code(detail, "VALIDATION_ERROR"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use chrono::NaiveDate;

    #[test]
    fn test_booking_conflict_maps_to_409() {
        let response = domain_error_to_response(&RentalError::BookingConflict.into());
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_limit_exceeded_maps_to_409() {
        let response =
            domain_error_to_response(&RentalError::RentalLimitExceeded { limit: 3 }.into());
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_range_maps_to_400() {
        let err = RentalError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        };
        let response = domain_error_to_response(&err.into());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = domain_error_to_response(&DomainError::not_found("Rental"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_maps_to_403() {
        let response = domain_error_to_response(&DomainError::Unauthorized);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_expired_token_maps_to_401() {
        let response = domain_error_to_response(&AuthError::TokenExpired.into());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
