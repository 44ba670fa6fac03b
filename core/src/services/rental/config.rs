//! Rental service configuration.

/// Configuration for the rental lifecycle service
#[derive(Debug, Clone)]
pub struct RentalServiceConfig {
    /// Maximum simultaneously `Confirmed` rentals for a plain user
    pub max_active_rentals: usize,
}

impl Default for RentalServiceConfig {
    fn default() -> Self {
        Self {
            max_active_rentals: 3,
        }
    }
}
