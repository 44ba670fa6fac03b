//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular customer, subject to the concurrent-rental cap
    User,
    /// Administrator, exempt from the cap and allowed to manage any rental
    Admin,
}

impl UserRole {
    /// String form as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// User entity
///
/// The two payment totals are a denormalized ledger over the user's
/// rentals. They are mutated only through the ledger service, never by
/// direct field assignment in handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique
    pub email: String,

    /// Telephone number
    pub tel: String,

    /// bcrypt hash of the password, never serialized out
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account role
    pub role: UserRole,

    /// Cumulative payment over all of the user's existing rentals
    pub total_payment: f64,

    /// Payment total restricted to rentals included for this year
    pub total_payment_this_year: f64,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user account with zeroed payment totals
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        tel: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            tel: tel.into(),
            password_hash: password_hash.into(),
            role,
            total_payment: 0.0,
            total_payment_this_year: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_with_zero_totals() {
        let user = User::new("Alice", "alice@example.com", "0812345678", "$2b$hash", UserRole::User);
        assert_eq!(user.total_payment, 0.0);
        assert_eq!(user.total_payment_this_year, 0.0);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse(UserRole::User.as_str()), Some(UserRole::User));
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("Bob", "bob@example.com", "02000000", "secret-hash", UserRole::User);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
