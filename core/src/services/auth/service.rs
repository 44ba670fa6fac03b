//! Account registration and login.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::TokenService;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt hashing cost
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Successful login/registration outcome
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The authenticated account
    pub user: User,
    /// Signed access token
    pub token: String,
}

/// Service handling registration and credential login
pub struct AuthService<U>
where
    U: UserRepository,
{
    user_repository: Arc<U>,
    token_service: Arc<TokenService>,
    config: AuthServiceConfig,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// Public registration always creates a plain `user` role account;
    /// administrators are provisioned out of band.
    ///
    /// # Returns
    /// * `Err(AuthError::EmailAlreadyRegistered)` - Email taken
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        tel: &str,
        password: &str,
    ) -> DomainResult<AuthOutcome> {
        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = bcrypt::hash(password, self.config.bcrypt_cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))?;

        let user = self
            .user_repository
            .create(User::new(name, email, tel, password_hash, UserRole::User))
            .await?;
        info!(user_id = %user.id, "registered new account");

        let token = self.token_service.issue(user.id, user.role)?;
        Ok(AuthOutcome { user, token })
    }

    /// Log in with email and password
    ///
    /// # Returns
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong
    ///   password (deliberately indistinguishable)
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthOutcome> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| DomainError::internal(format!("password verification failed: {e}")))?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.issue(user.id, user.role)?;
        Ok(AuthOutcome { user, token })
    }

    /// Load the profile of an authenticated user
    pub async fn me(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    fn service() -> AuthService<MockUserRepository> {
        let users = Arc::new(MockUserRepository::new());
        let tokens = Arc::new(TokenService::new("test-secret", "rentwheels", 3600));
        // Minimum cost keeps the hashing fast in tests.
        AuthService::new(users, tokens, AuthServiceConfig { bcrypt_cost: 4 })
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service();

        let registered = auth
            .register("Alice", "alice@example.com", "0812345678", "s3cret!")
            .await
            .unwrap();
        assert_eq!(registered.user.role, UserRole::User);
        assert!(!registered.token.is_empty());

        let logged_in = auth.login("alice@example.com", "s3cret!").await.unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let auth = service();
        auth.register("Alice", "alice@example.com", "0", "pw1").await.unwrap();

        let err = auth
            .register("Impostor", "alice@example.com", "1", "pw2")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let auth = service();
        auth.register("Alice", "alice@example.com", "0", "right").await.unwrap();

        let err = auth.login("alice@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));

        let err = auth.login("nobody@example.com", "right").await.unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    }
}
