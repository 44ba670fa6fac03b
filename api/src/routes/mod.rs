//! Route handlers, one module per resource.

pub mod audit;
pub mod auth;
pub mod cars;
pub mod rentals;
