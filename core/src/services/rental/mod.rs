//! Rental booking: availability, admission and the rental lifecycle.

mod admission;
mod availability;
mod config;
mod service;

pub use admission::AdmissionPolicy;
pub use availability::AvailabilityChecker;
pub use config::RentalServiceConfig;
pub use service::{Actor, CarSummary, CreateRental, RentalDetails, RentalService, UpdateRental};

#[cfg(test)]
mod tests;
