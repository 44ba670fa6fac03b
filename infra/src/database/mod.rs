//! Database module - MySQL implementations using SQLx
//!
//! Provides the connection pool and the repository implementations for
//! rentals, cars, users and the audit trail.

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlAuditLogRepository, MySqlCarRepository, MySqlRentalRepository, MySqlUserRepository,
};
