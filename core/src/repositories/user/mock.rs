//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::not_found("User"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn adjust_payment_totals(
        &self,
        user_id: Uuid,
        total_delta: f64,
        yearly_delta: f64,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::not_found("User"))?;

        user.total_payment += total_delta;
        user.total_payment_this_year += yearly_delta;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::UserRole;

    #[tokio::test]
    async fn test_adjust_totals() {
        let repo = MockUserRepository::new();
        let user = repo
            .create(User::new("Alice", "alice@example.com", "000", "hash", UserRole::User))
            .await
            .unwrap();

        repo.adjust_payment_totals(user.id, 540.0, 540.0).await.unwrap();
        repo.adjust_payment_totals(user.id, 100.0, 0.0).await.unwrap();
        repo.adjust_payment_totals(user.id, -40.0, -40.0).await.unwrap();

        let user = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(user.total_payment, 600.0);
        assert_eq!(user.total_payment_this_year, 500.0);
    }

    #[tokio::test]
    async fn test_adjust_totals_unknown_user() {
        let repo = MockUserRepository::new();
        let err = repo
            .adjust_payment_totals(Uuid::new_v4(), 1.0, 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MockUserRepository::new();
        repo.create(User::new("A", "same@example.com", "1", "h", UserRole::User))
            .await
            .unwrap();
        let err = repo
            .create(User::new("B", "same@example.com", "2", "h", UserRole::User))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
