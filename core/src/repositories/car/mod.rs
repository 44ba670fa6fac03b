//! Car repository module.

mod r#trait;
pub use r#trait::CarRepository;

mod mock;
pub use mock::MockCarRepository;
