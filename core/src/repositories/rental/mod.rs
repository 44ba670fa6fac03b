//! Rental repository module.

mod r#trait;
pub use r#trait::RentalRepository;

mod mock;
pub use mock::MockRentalRepository;
