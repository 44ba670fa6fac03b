//! Common type definitions shared across layers.

pub mod response;

pub use response::ApiResponse;
