//! Shared configuration and common types for the RentWheels backend.
//!
//! This crate contains everything that is useful to more than one layer
//! but belongs to none of them: environment-driven configuration structs
//! and the API response envelope.

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::response::ApiResponse;
