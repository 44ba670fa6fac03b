//! Audit trail routes.

pub mod list;
