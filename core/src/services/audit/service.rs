//! Audit service recording every state-changing operation.
//!
//! Audit writes are best-effort: a failed write is logged and swallowed,
//! it never rolls back or blocks the primary operation. With
//! `async_writes` on (the default) the write happens on a background
//! task so the booking flow does not wait for the audit sink at all.

use std::sync::Arc;

use tokio::task;
use tracing::error;
use uuid::Uuid;

use crate::domain::entities::audit::{AuditAction, AuditLog};
use crate::errors::DomainResult;
use crate::repositories::AuditLogRepository;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Whether to run audit writes on a background task
    pub async_writes: bool,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self { async_writes: true }
    }
}

/// Service for recording and querying audit logs
pub struct AuditService<A>
where
    A: AuditLogRepository,
{
    repository: Arc<A>,
    config: AuditServiceConfig,
}

impl<A> AuditService<A>
where
    A: AuditLogRepository + 'static,
{
    /// Create a new audit service
    pub fn new(repository: Arc<A>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Record a mutation
    ///
    /// # Arguments
    /// * `action` - What happened (Create/Update/Delete)
    /// * `actor_id` - User who performed the action
    /// * `target` - Collection name (see `entities::audit::targets`)
    /// * `target_id` - Identifier of the touched record
    /// * `description` - Human-readable summary
    pub async fn record(
        &self,
        action: AuditAction,
        actor_id: Uuid,
        target: &'static str,
        target_id: Uuid,
        description: impl Into<String>,
    ) {
        let log = AuditLog::new(action, actor_id, target, target_id)
            .with_description(description);

        if self.config.async_writes {
            let repository = Arc::clone(&self.repository);
            task::spawn(async move {
                if let Err(e) = repository.create(&log).await {
                    error!(error = %e, "failed to write audit log");
                }
            });
        } else if let Err(e) = self.repository.create(&log).await {
            error!(error = %e, "failed to write audit log");
        }
    }

    /// Most recent audit records
    pub async fn recent(&self, limit: usize) -> DomainResult<Vec<AuditLog>> {
        self.repository.find_recent(limit).await
    }

    /// Audit records for actions performed by a user
    pub async fn for_user(&self, user_id: Uuid, limit: usize) -> DomainResult<Vec<AuditLog>> {
        self.repository.find_by_user(user_id, limit).await
    }

    /// Audit records touching a target collection
    pub async fn for_target(&self, target: &str, limit: usize) -> DomainResult<Vec<AuditLog>> {
        self.repository.find_by_target(target, limit).await
    }
}
