//! MySQL implementation of the AuditLogRepository trait.
//!
//! Audit records land in the append-only audit_logs table. Nothing ever
//! updates or deletes rows here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rw_core::domain::entities::audit::{AuditAction, AuditLog};
use rw_core::errors::DomainError;
use rw_core::repositories::audit::AuditLogRepository;

const AUDIT_COLUMNS: &str = "id, action, user_id, target, target_id, description, created_at";

/// MySQL implementation of AuditLogRepository
pub struct MySqlAuditLogRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    /// Create a new MySQL audit log repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(name).map_err(|e| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        })
    }

    /// Convert database row to AuditLog entity
    fn row_to_audit_log(row: &sqlx::mysql::MySqlRow) -> Result<AuditLog, DomainError> {
        let id: String = Self::column(row, "id")?;
        let user_id: String = Self::column(row, "user_id")?;
        let target_id: String = Self::column(row, "target_id")?;
        let action_str: String = Self::column(row, "action")?;

        let action = AuditAction::parse(&action_str).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown audit action: {}", action_str),
        })?;

        let parse_uuid = |value: &str| {
            Uuid::parse_str(value).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })
        };

        Ok(AuditLog {
            id: parse_uuid(&id)?,
            action,
            user_id: parse_uuid(&user_id)?,
            target: Self::column(row, "target")?,
            target_id: parse_uuid(&target_id)?,
            description: Self::column::<Option<String>>(row, "description")?,
            created_at: Self::column::<DateTime<Utc>>(row, "created_at")?,
        })
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn create(&self, audit_log: &AuditLog) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO audit_logs (
                id, action, user_id, target, target_id, description, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(audit_log.id.to_string())
            .bind(audit_log.action.as_str())
            .bind(audit_log.user_id.to_string())
            .bind(&audit_log.target)
            .bind(audit_log.target_id.to_string())
            .bind(&audit_log.description)
            .bind(audit_log.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create audit log: {}", e),
            })?;

        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<AuditLog>, DomainError> {
        let query = format!(
            "SELECT {} FROM audit_logs ORDER BY created_at DESC LIMIT ?",
            AUDIT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to list audit logs: {}", e),
            })?;

        rows.iter().map(Self::row_to_audit_log).collect()
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        let query = format!(
            "SELECT {} FROM audit_logs WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
            AUDIT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find audit logs by user: {}", e),
            })?;

        rows.iter().map(Self::row_to_audit_log).collect()
    }

    async fn find_by_target(
        &self,
        target: &str,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        let query = format!(
            "SELECT {} FROM audit_logs WHERE target = ? ORDER BY created_at DESC LIMIT ?",
            AUDIT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(target)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find audit logs by target: {}", e),
            })?;

        rows.iter().map(Self::row_to_audit_log).collect()
    }
}
