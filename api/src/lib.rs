//! HTTP surface of the RentWheels backend.
//!
//! Routes are thin: they deserialize and validate the request, resolve
//! the caller from the JWT middleware, call into `rw_core` services and
//! wrap the outcome in the shared response envelope.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
