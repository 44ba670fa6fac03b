//! MySQL repository implementations.

mod audit_repository_impl;
mod car_repository_impl;
mod rental_repository_impl;
mod user_repository_impl;

pub use audit_repository_impl::MySqlAuditLogRepository;
pub use car_repository_impl::MySqlCarRepository;
pub use rental_repository_impl::MySqlRentalRepository;
pub use user_repository_impl::MySqlUserRepository;
