//! Best-effort audit logging.

mod service;
pub use service::{AuditService, AuditServiceConfig};
