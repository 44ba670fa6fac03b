//! Car fleet service: CRUD over the fleet plus the rental cascade on
//! removal.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::audit::{targets, AuditAction};
use crate::domain::entities::car::Car;
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    AuditLogRepository, CarRepository, NoOpAuditLogRepository, RentalRepository, UserRepository,
};
use crate::services::audit::AuditService;
use crate::services::rental::{Actor, RentalService};

/// Request to register a car
#[derive(Debug, Clone)]
pub struct CreateCar {
    pub name: String,
    pub vin_plate: String,
    pub provider_id: Uuid,
    pub picture_url: String,
    pub capacity: u32,
    pub description: String,
    pub price_per_day: f64,
}

/// Partial update of a car; `None` fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdateCar {
    pub name: Option<String>,
    pub picture_url: Option<String>,
    pub capacity: Option<u32>,
    pub description: Option<String>,
    pub price_per_day: Option<f64>,
}

/// Fleet management service
///
/// Mutations are admin-only. Deleting a car cascades through the rental
/// service so every booking of the car is removed and its ledger
/// contribution reversed before the car row goes away.
pub struct CarService<R, C, U, A = NoOpAuditLogRepository>
where
    R: RentalRepository,
    C: CarRepository,
    U: UserRepository,
    A: AuditLogRepository + 'static,
{
    car_repository: Arc<C>,
    rental_service: Arc<RentalService<R, C, U, A>>,
    audit_service: Option<Arc<AuditService<A>>>,
}

impl<R, C, U, A> CarService<R, C, U, A>
where
    R: RentalRepository,
    C: CarRepository,
    U: UserRepository,
    A: AuditLogRepository + 'static,
{
    /// Create a fleet service without audit logging
    pub fn new(car_repository: Arc<C>, rental_service: Arc<RentalService<R, C, U, A>>) -> Self {
        Self {
            car_repository,
            rental_service,
            audit_service: None,
        }
    }

    /// Create a fleet service with audit logging
    pub fn with_audit(
        car_repository: Arc<C>,
        rental_service: Arc<RentalService<R, C, U, A>>,
        audit_service: Arc<AuditService<A>>,
    ) -> Self {
        Self {
            car_repository,
            rental_service,
            audit_service: Some(audit_service),
        }
    }

    async fn audit(&self, action: AuditAction, actor: &Actor, target_id: Uuid, description: String) {
        if let Some(audit) = &self.audit_service {
            audit
                .record(action, actor.id, targets::CARS, target_id, description)
                .await;
        }
    }

    fn require_admin(actor: &Actor) -> DomainResult<()> {
        if actor.role != UserRole::Admin {
            return Err(DomainError::Unauthorized);
        }
        Ok(())
    }

    /// List every car in the fleet
    pub async fn list_cars(&self) -> DomainResult<Vec<Car>> {
        self.car_repository.find_all().await
    }

    /// Load a single car
    pub async fn get_car(&self, car_id: Uuid) -> DomainResult<Car> {
        self.car_repository
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car"))
    }

    /// Register a new car
    ///
    /// VIN plates are unique; registering a plate already on file is a
    /// validation error.
    pub async fn create_car(&self, request: CreateCar, actor: &Actor) -> DomainResult<Car> {
        Self::require_admin(actor)?;

        if request.price_per_day <= 0.0 {
            return Err(DomainError::Validation {
                message: "price_per_day must be positive".to_string(),
            });
        }
        if self
            .car_repository
            .find_by_vin(&request.vin_plate)
            .await?
            .is_some()
        {
            return Err(DomainError::Validation {
                message: format!("VIN plate {} is already registered", request.vin_plate),
            });
        }

        let car = Car::new(
            request.name,
            request.vin_plate,
            request.provider_id,
            request.price_per_day,
        )
        .with_picture(request.picture_url)
        .with_details(request.capacity, request.description);

        let car = self.car_repository.create(car).await?;

        info!(car_id = %car.id, vin_plate = %car.vin_plate, "registered car");
        self.audit(
            AuditAction::Create,
            actor,
            car.id,
            format!("Create car id {}.", car.id),
        )
        .await;

        Ok(car)
    }

    /// Update a car's listing fields
    pub async fn update_car(&self, car_id: Uuid, changes: UpdateCar, actor: &Actor) -> DomainResult<Car> {
        Self::require_admin(actor)?;

        let mut car = self
            .car_repository
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car"))?;

        if let Some(name) = changes.name {
            car.name = name;
        }
        if let Some(picture_url) = changes.picture_url {
            car.picture_url = picture_url;
        }
        if let Some(capacity) = changes.capacity {
            car.capacity = capacity;
        }
        if let Some(description) = changes.description {
            car.description = description;
        }
        if let Some(price_per_day) = changes.price_per_day {
            if price_per_day <= 0.0 {
                return Err(DomainError::Validation {
                    message: "price_per_day must be positive".to_string(),
                });
            }
            car.price_per_day = price_per_day;
        }

        let car = self.car_repository.update(car).await?;

        info!(car_id = %car.id, "updated car");
        self.audit(
            AuditAction::Update,
            actor,
            car.id,
            format!("Update car id {}.", car.id),
        )
        .await;

        Ok(car)
    }

    /// Remove a car and every rental booked on it
    pub async fn delete_car(&self, car_id: Uuid, actor: &Actor) -> DomainResult<()> {
        Self::require_admin(actor)?;

        // Load first so a missing car reports NotFound before any cascade.
        let car = self
            .car_repository
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car"))?;

        let deleted_rentals = self.rental_service.delete_rentals_for_car(car.id).await?;
        self.car_repository.delete(car.id).await?;

        info!(car_id = %car.id, deleted_rentals, "deleted car");
        self.audit(
            AuditAction::Delete,
            actor,
            car.id,
            format!("Delete car id {} and {} rentals.", car.id, deleted_rentals),
        )
        .await;

        Ok(())
    }
}
