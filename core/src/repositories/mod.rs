//! Repository traits and their in-memory test doubles.
//!
//! Persistence implementations live in the infra crate; the mocks here
//! exist so that services can be unit-tested without a database.

pub mod audit;
pub mod car;
pub mod rental;
pub mod user;

pub use audit::{AuditLogRepository, MockAuditLogRepository, NoOpAuditLogRepository};
pub use car::{CarRepository, MockCarRepository};
pub use rental::{MockRentalRepository, RentalRepository};
pub use user::{MockUserRepository, UserRepository};
