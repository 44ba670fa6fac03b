//! Domain entities.

pub mod audit;
pub mod car;
pub mod rental;
pub mod token;
pub mod user;

pub use audit::{AuditAction, AuditLog};
pub use car::Car;
pub use rental::{Rental, RentalStatus, YearlyInclusion};
pub use token::Claims;
pub use user::{User, UserRole};
