//! Audit log entity recording who changed what.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Names of the collections audit records point at
pub mod targets {
    pub const RENTALS: &str = "rentals";
    pub const CARS: &str = "cars";
    pub const USERS: &str = "users";
}

/// Kind of mutation recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    /// String form as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    /// Parse the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Create" => Some(Self::Create),
            "Update" => Some(Self::Update),
            "Delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// One append-only audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    /// Unique identifier for the record
    pub id: Uuid,

    /// What kind of mutation happened
    pub action: AuditAction,

    /// User who performed the action
    pub user_id: Uuid,

    /// Collection the action touched (see [`targets`])
    pub target: String,

    /// Identifier of the touched record
    pub target_id: Uuid,

    /// Human-readable description
    pub description: Option<String>,

    /// Timestamp when the record was written
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Creates a new audit record
    pub fn new(action: AuditAction, user_id: Uuid, target: impl Into<String>, target_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            user_id,
            target: target.into(),
            target_id,
            description: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let actor = Uuid::new_v4();
        let rental = Uuid::new_v4();
        let log = AuditLog::new(AuditAction::Create, actor, targets::RENTALS, rental)
            .with_description(format!("Create renting id {rental}."));

        assert_eq!(log.action, AuditAction::Create);
        assert_eq!(log.target, "rentals");
        assert_eq!(log.target_id, rental);
        assert!(log.description.unwrap().contains(&rental.to_string()));
    }

    #[test]
    fn test_action_round_trip() {
        assert_eq!(AuditAction::parse("Delete"), Some(AuditAction::Delete));
        assert_eq!(AuditAction::parse(AuditAction::Update.as_str()), Some(AuditAction::Update));
        assert_eq!(AuditAction::parse("Read"), None);
    }
}
