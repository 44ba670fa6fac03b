//! Audit log repository trait defining the interface for audit persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainError;

/// Repository trait for AuditLog entity persistence operations
///
/// The audit trail is append-only. Writes are best-effort from the
/// booking core's perspective: a failed audit write is logged and
/// swallowed, never propagated into the primary operation.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append a new audit record
    async fn create(&self, audit_log: &AuditLog) -> Result<(), DomainError>;

    /// Most recent records across all targets, newest first
    async fn find_recent(&self, limit: usize) -> Result<Vec<AuditLog>, DomainError>;

    /// Records of actions performed by a user, newest first
    async fn find_by_user(&self, user_id: Uuid, limit: usize) -> Result<Vec<AuditLog>, DomainError>;

    /// Records touching a target collection, newest first
    async fn find_by_target(&self, target: &str, limit: usize) -> Result<Vec<AuditLog>, DomainError>;
}
