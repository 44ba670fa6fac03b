//! # Infrastructure Layer
//!
//! MySQL-backed implementations of the repository traits defined in
//! `rw_core`. The booking core never talks to the database directly; it
//! goes through the traits, and this crate supplies the concrete SQLx
//! implementations plus the connection pool they share.

pub mod database;

pub use database::connection::{DatabasePool, PoolStatistics};
pub use database::mysql::{
    MySqlAuditLogRepository, MySqlCarRepository, MySqlRentalRepository, MySqlUserRepository,
};
