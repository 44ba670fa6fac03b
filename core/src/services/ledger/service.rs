//! Ledger service applying and reversing rental payments against a
//! user's running totals.
//!
//! Every mutation goes through the repository's atomic relative
//! increment, so concurrent bookings for the same user cannot lose an
//! update the way a read-modify-write would.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::repositories::UserRepository;

/// Service maintaining `total_payment` and `total_payment_this_year`
pub struct LedgerService<U>
where
    U: UserRepository,
{
    user_repository: Arc<U>,
}

impl<U> LedgerService<U>
where
    U: UserRepository,
{
    /// Create a new ledger service
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// Add a rental's price to the user's totals
    ///
    /// `affects_yearly` mirrors the rental's inclusion flag. The caller
    /// must pass the same flag value to [`reverse`](Self::reverse) later,
    /// or the two totals drift apart.
    pub async fn apply(&self, user_id: Uuid, amount: f64, affects_yearly: bool) -> DomainResult<()> {
        debug!(%user_id, amount, affects_yearly, "applying ledger contribution");
        let yearly = if affects_yearly { amount } else { 0.0 };
        self.user_repository
            .adjust_payment_totals(user_id, amount, yearly)
            .await
    }

    /// Subtract a previously applied contribution
    pub async fn reverse(&self, user_id: Uuid, amount: f64, affects_yearly: bool) -> DomainResult<()> {
        debug!(%user_id, amount, affects_yearly, "reversing ledger contribution");
        let yearly = if affects_yearly { -amount } else { 0.0 };
        self.user_repository
            .adjust_payment_totals(user_id, -amount, yearly)
            .await
    }

    /// Swap an old contribution for a new one in a single increment
    ///
    /// Used on rental updates: the net delta `new - old` is applied once,
    /// to both totals when `affects_yearly` is set.
    pub async fn replace(
        &self,
        user_id: Uuid,
        old_amount: f64,
        new_amount: f64,
        affects_yearly: bool,
    ) -> DomainResult<()> {
        debug!(%user_id, old_amount, new_amount, affects_yearly, "replacing ledger contribution");
        let delta = new_amount - old_amount;
        let yearly = if affects_yearly { delta } else { 0.0 };
        self.user_repository
            .adjust_payment_totals(user_id, delta, yearly)
            .await
    }

    /// Move an already applied contribution into or out of the this-year
    /// total
    ///
    /// Used when a rental's yearly inclusion flips after booking: the
    /// cumulative total already holds the price, only
    /// `total_payment_this_year` moves.
    pub async fn shift_yearly(&self, user_id: Uuid, amount: f64, into_year: bool) -> DomainResult<()> {
        debug!(%user_id, amount, into_year, "shifting yearly contribution");
        let yearly = if into_year { amount } else { -amount };
        self.user_repository
            .adjust_payment_totals(user_id, 0.0, yearly)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::{User, UserRole};
    use crate::repositories::MockUserRepository;

    async fn setup() -> (LedgerService<MockUserRepository>, Arc<MockUserRepository>, Uuid) {
        let repo = Arc::new(MockUserRepository::new());
        let user = repo
            .create(User::new("Alice", "alice@example.com", "000", "hash", UserRole::User))
            .await
            .unwrap();
        (LedgerService::new(Arc::clone(&repo)), repo, user.id)
    }

    #[tokio::test]
    async fn test_apply_then_reverse_restores_totals() {
        let (ledger, repo, user_id) = setup().await;

        ledger.apply(user_id, 540.0, true).await.unwrap();
        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(user.total_payment, 540.0);
        assert_eq!(user.total_payment_this_year, 540.0);

        ledger.reverse(user_id, 540.0, true).await.unwrap();
        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(user.total_payment, 0.0);
        assert_eq!(user.total_payment_this_year, 0.0);
    }

    #[tokio::test]
    async fn test_excluded_rental_only_touches_cumulative_total() {
        let (ledger, repo, user_id) = setup().await;

        ledger.apply(user_id, 300.0, false).await.unwrap();
        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(user.total_payment, 300.0);
        assert_eq!(user.total_payment_this_year, 0.0);
    }

    #[tokio::test]
    async fn test_shift_yearly_leaves_cumulative_total_alone() {
        let (ledger, repo, user_id) = setup().await;

        ledger.apply(user_id, 450.0, true).await.unwrap();
        ledger.shift_yearly(user_id, 450.0, false).await.unwrap();

        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(user.total_payment, 450.0);
        assert_eq!(user.total_payment_this_year, 0.0);

        ledger.shift_yearly(user_id, 450.0, true).await.unwrap();
        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(user.total_payment_this_year, 450.0);
    }

    #[tokio::test]
    async fn test_replace_applies_net_delta() {
        let (ledger, repo, user_id) = setup().await;

        ledger.apply(user_id, 540.0, true).await.unwrap();
        ledger.replace(user_id, 540.0, 720.0, true).await.unwrap();

        let user = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(user.total_payment, 720.0);
        assert_eq!(user.total_payment_this_year, 720.0);
    }
}
