//! JWT access-token encoding and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::UserRole;
use crate::errors::{AuthError, DomainError, DomainResult};

/// Service issuing and verifying HS256 access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expiry_seconds: i64,
}

impl TokenService {
    /// Create a new token service from a shared secret
    pub fn new(secret: &str, issuer: impl Into<String>, expiry_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            expiry_seconds,
        }
    }

    /// Issue an access token for a user
    pub fn issue(&self, user_id: Uuid, role: UserRole) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expiry_seconds)).timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("token encoding failed: {e}")))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Auth(AuthError::TokenExpired)
                }
                _ => DomainError::Auth(AuthError::InvalidToken),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::new("test-secret", "rentwheels", 3600);
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, UserRole::Admin).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.iss, "rentwheels");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuing = TokenService::new("secret-a", "rentwheels", 3600);
        let verifying = TokenService::new("secret-b", "rentwheels", 3600);

        let token = issuing.issue(Uuid::new_v4(), UserRole::User).unwrap();
        let err = verifying.verify(&token).unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new("test-secret", "rentwheels", -10);
        let token = service.issue(Uuid::new_v4(), UserRole::User).unwrap();
        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::TokenExpired)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new("test-secret", "rentwheels", 3600);
        assert!(service.verify("not.a.token").is_err());
    }
}
