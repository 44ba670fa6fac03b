//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - Email already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user's profile fields
    ///
    /// The payment totals are NOT written through this method; use
    /// [`adjust_payment_totals`](Self::adjust_payment_totals) so the
    /// increment happens atomically in the store.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Atomically add deltas to the user's payment totals
    ///
    /// Adds `total_delta` to `total_payment` and `yearly_delta` to
    /// `total_payment_this_year`. Negative deltas reverse a contribution;
    /// a zero delta leaves that total untouched. This must be a single
    /// relative-increment write, not a read-modify-write, so that
    /// concurrent bookings for the same user cannot lose an update.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No user with the given ID
    async fn adjust_payment_totals(
        &self,
        user_id: Uuid,
        total_delta: f64,
        yearly_delta: f64,
    ) -> Result<(), DomainError>;
}
