//! JWT access-token claims.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::UserRole;
use crate::errors::{AuthError, DomainError};

/// Claims carried in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID as a string
    pub sub: String,

    /// Role of the authenticated user
    pub role: UserRole,

    /// Issued-at (unix seconds)
    pub iat: i64,

    /// Expiry (unix seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Token ID
    pub jti: String,
}

impl Claims {
    /// Parse the subject claim back into a user ID
    pub fn user_id(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.sub).map_err(|_| DomainError::Auth(AuthError::InvalidToken))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parsing() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            role: UserRole::User,
            iat: 0,
            exp: 0,
            iss: "rentwheels".to_string(),
            jti: Uuid::new_v4().to_string(),
        };
        assert_eq!(claims.user_id().unwrap(), id);
    }

    #[test]
    fn test_invalid_subject_rejected() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            role: UserRole::Admin,
            iat: 0,
            exp: 0,
            iss: "rentwheels".to_string(),
            jti: String::new(),
        };
        assert!(claims.user_id().is_err());
    }
}
