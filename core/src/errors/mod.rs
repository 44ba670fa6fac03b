//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, RentalError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Rental(#[from] RentalError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    /// Shorthand for a not-found error over a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Shorthand for a storage-layer failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
