//! Authentication: credentials, accounts and JWT access tokens.

mod service;
mod token;

pub use service::{AuthService, AuthServiceConfig};
pub use token::TokenService;
