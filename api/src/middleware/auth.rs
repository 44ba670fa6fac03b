//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! with the core `TokenService` held in app data, and injects an
//! [`AuthContext`] into the request extensions for handlers to extract.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use rw_core::domain::entities::token::Claims;
use rw_core::domain::entities::user::UserRole;
use rw_core::errors::DomainError;
use rw_core::services::auth::TokenService;

use crate::handlers::error::domain_error_to_response;

/// Caller identity injected into requests by [`JwtAuth`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// Role carried by the token
    pub role: UserRole,
    /// JWT ID
    pub jti: String,
}

impl AuthContext {
    /// Build an authentication context from verified claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims.user_id()?;
        Ok(Self {
            user_id,
            role: claims.role,
            jti: claims.jti,
        })
    }

    /// Whether the caller holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    /// Create the middleware around a token service
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Err(unauthorized_error(
                        "Missing or invalid Authorization header",
                    ));
                }
            };

            let context = token_service
                .verify(&token)
                .and_then(AuthContext::from_claims)
                .map_err(|e| {
                    let response = domain_error_to_response(&e);
                    actix_web::error::InternalError::from_response(e, response).into()
                });

            match context {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await
                }
                Err(e) => Err(e),
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    bearer_from_headers(req.headers())
}

fn bearer_from_headers(headers: &actix_web::http::header::HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

fn unauthorized_error(message: &'static str) -> Error {
    use rw_shared::types::response::ApiResponse;
    let response = actix_web::HttpResponse::Unauthorized()
        .json(ApiResponse::<()>::error_with_code(message, "INVALID_TOKEN"));
    actix_web::error::InternalError::from_response(message, response).into()
}

/// Extractor for required authentication
///
/// Routes behind [`JwtAuth`] pull the caller identity out of the request
/// extensions. Routes in mixed public/protected scopes are not wrapped;
/// for those the extractor verifies the bearer token itself against the
/// `TokenService` registered in app data.
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(context) = req.extensions().get::<AuthContext>().cloned() {
            return ready(Ok(context));
        }

        let token = match bearer_from_headers(req.headers()) {
            Some(token) => token,
            None => {
                return ready(Err(unauthorized_error(
                    "Missing or invalid Authorization header",
                )))
            }
        };
        let token_service = match req.app_data::<web::Data<Arc<TokenService>>>() {
            Some(service) => service,
            None => return ready(Err(unauthorized_error("Token verification not configured"))),
        };

        let result = token_service
            .verify(&token)
            .and_then(AuthContext::from_claims)
            .map_err(|e| {
                let response = domain_error_to_response(&e);
                actix_web::error::InternalError::from_response(e, response).into()
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_auth_context_from_claims() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: UserRole::Admin,
            iat: 0,
            exp: i64::MAX,
            iss: "rentwheels".to_string(),
            jti: "jti-1".to_string(),
        };

        let context = AuthContext::from_claims(claims).unwrap();
        assert!(context.is_admin());
    }

    #[test]
    fn test_auth_context_rejects_malformed_subject() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            role: UserRole::User,
            iat: 0,
            exp: i64::MAX,
            iss: "rentwheels".to_string(),
            jti: "jti-2".to_string(),
        };

        assert!(AuthContext::from_claims(claims).is_err());
    }
}
