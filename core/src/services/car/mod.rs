//! Fleet management service.

mod service;

pub use service::{CarService, CreateCar, UpdateCar};
