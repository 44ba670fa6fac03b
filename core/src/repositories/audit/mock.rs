//! Mock implementation of AuditLogRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainError;

use super::AuditLogRepository;

/// Mock audit log repository for testing
pub struct MockAuditLogRepository {
    logs: Arc<RwLock<Vec<AuditLog>>>,
}

impl MockAuditLogRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// All recorded entries, in insertion order (test assertions)
    pub async fn entries(&self) -> Vec<AuditLog> {
        self.logs.read().await.clone()
    }
}

impl Default for MockAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn create(&self, audit_log: &AuditLog) -> Result<(), DomainError> {
        self.logs.write().await.push(audit_log.clone());
        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<AuditLog>, DomainError> {
        let logs = self.logs.read().await;
        Ok(logs.iter().rev().take(limit).cloned().collect())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .rev()
            .filter(|l| l.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_target(
        &self,
        target: &str,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        let logs = self.logs.read().await;
        Ok(logs
            .iter()
            .rev()
            .filter(|l| l.target == target)
            .take(limit)
            .cloned()
            .collect())
    }
}
