//! Core business logic and domain layer for the RentWheels backend.
//!
//! This crate is infrastructure-free: it defines the domain entities,
//! the repository traits that persistence implementations must fulfil,
//! and the services that hold the booking rules: pricing, availability,
//! the concurrent-rental cap, the rental lifecycle and the per-user
//! payment ledger.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult};
