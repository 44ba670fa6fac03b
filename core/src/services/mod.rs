//! Business services containing domain logic and use cases.

pub mod audit;
pub mod auth;
pub mod car;
pub mod ledger;
pub mod pricing;
pub mod rental;

// Re-export commonly used types
pub use audit::AuditService;
pub use auth::{AuthService, AuthServiceConfig, TokenService};
pub use car::CarService;
pub use ledger::LedgerService;
pub use rental::{Actor, RentalService, RentalServiceConfig};
