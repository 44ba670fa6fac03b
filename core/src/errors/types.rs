//! Error type definitions for booking and authentication operations.
//!
//! All of these are recoverable outcomes reported to the caller; none of
//! them is fatal. HTTP status mapping lives in the presentation layer.

use chrono::NaiveDate;
use thiserror::Error;

/// Booking-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RentalError {
    #[error("End date must be after start date: {start} > {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("This car is already rented during the requested period")]
    BookingConflict,

    #[error("User has already rented {limit} cars")]
    RentalLimitExceeded { limit: usize },
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("This email is already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,
}
