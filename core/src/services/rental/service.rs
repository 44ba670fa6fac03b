//! Rental lifecycle service.
//!
//! Orchestrates create/update/delete/finish/list of rentals, keeping the
//! rental store, the car fleet and the owning user's payment ledger
//! consistent, and recording every mutation in the audit trail.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::car::Car;
use crate::domain::entities::audit::{targets, AuditAction};
use crate::domain::entities::rental::{Rental, YearlyInclusion};
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, DomainResult, RentalError};
use crate::repositories::{
    AuditLogRepository, CarRepository, NoOpAuditLogRepository, RentalRepository, UserRepository,
};
use crate::services::audit::AuditService;
use crate::services::ledger::LedgerService;
use crate::services::pricing;

use super::admission::AdmissionPolicy;
use super::availability::AvailabilityChecker;
use super::config::RentalServiceConfig;

/// Authenticated caller identity, resolved by the boundary layer
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    /// User ID of the caller
    pub id: Uuid,
    /// Role of the caller
    pub role: UserRole,
}

impl Actor {
    /// Create a new actor
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }

    fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    fn may_manage(&self, rental: &Rental) -> bool {
        self.is_admin() || rental.user_id == self.id
    }
}

/// Request to create a rental
#[derive(Debug, Clone)]
pub struct CreateRental {
    /// Car to book
    pub car_id: Uuid,
    /// Owner of the booking; defaults to the actor when absent
    pub user_id: Option<Uuid>,
    /// First day of the rental
    pub start_date: NaiveDate,
    /// Last day of the rental (inclusive)
    pub end_date: NaiveDate,
    /// Discount percentage (0-100)
    pub discount: f64,
    /// Name of the applied coupon, if any
    pub coupon_name: Option<String>,
    /// Maximum absolute discount carried by the coupon
    pub max_discount: Option<f64>,
}

/// Partial update of a rental; `None` fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdateRental {
    /// Move the booking to another car
    pub car_id: Option<Uuid>,
    /// New first day
    pub start_date: Option<NaiveDate>,
    /// New last day
    pub end_date: Option<NaiveDate>,
    /// New discount percentage, applied from the next repricing onward
    pub discount: Option<f64>,
    /// Change whether the rental counts toward the this-year total
    pub inclusion: Option<YearlyInclusion>,
}

/// Car fields projected onto rental read models
#[derive(Debug, Clone, Serialize)]
pub struct CarSummary {
    pub name: String,
    pub vin_plate: String,
    pub price_per_day: f64,
}

/// A rental together with projected car and user fields
#[derive(Debug, Clone, Serialize)]
pub struct RentalDetails {
    #[serde(flatten)]
    pub rental: Rental,
    /// Summary of the booked car; absent if the car vanished
    pub car: Option<CarSummary>,
    /// Name of the booking user
    pub user_name: Option<String>,
}

/// Rental lifecycle service
pub struct RentalService<R, C, U, A = NoOpAuditLogRepository>
where
    R: RentalRepository,
    C: CarRepository,
    U: UserRepository,
    A: AuditLogRepository + 'static,
{
    rental_repository: Arc<R>,
    car_repository: Arc<C>,
    user_repository: Arc<U>,
    availability: AvailabilityChecker<R>,
    admission: AdmissionPolicy<R>,
    ledger: LedgerService<U>,
    audit_service: Option<Arc<AuditService<A>>>,
}

impl<R, C, U> RentalService<R, C, U, NoOpAuditLogRepository>
where
    R: RentalRepository,
    C: CarRepository,
    U: UserRepository,
{
    /// Create a rental service without audit logging
    pub fn new(
        rental_repository: Arc<R>,
        car_repository: Arc<C>,
        user_repository: Arc<U>,
        config: RentalServiceConfig,
    ) -> Self {
        Self {
            availability: AvailabilityChecker::new(Arc::clone(&rental_repository)),
            admission: AdmissionPolicy::new(Arc::clone(&rental_repository), config.max_active_rentals),
            ledger: LedgerService::new(Arc::clone(&user_repository)),
            rental_repository,
            car_repository,
            user_repository,
            audit_service: None,
        }
    }
}

impl<R, C, U, A> RentalService<R, C, U, A>
where
    R: RentalRepository,
    C: CarRepository,
    U: UserRepository,
    A: AuditLogRepository + 'static,
{
    /// Create a rental service with audit logging
    pub fn with_audit(
        rental_repository: Arc<R>,
        car_repository: Arc<C>,
        user_repository: Arc<U>,
        audit_service: Arc<AuditService<A>>,
        config: RentalServiceConfig,
    ) -> Self {
        Self {
            availability: AvailabilityChecker::new(Arc::clone(&rental_repository)),
            admission: AdmissionPolicy::new(Arc::clone(&rental_repository), config.max_active_rentals),
            ledger: LedgerService::new(Arc::clone(&user_repository)),
            rental_repository,
            car_repository,
            user_repository,
            audit_service: Some(audit_service),
        }
    }

    async fn audit(
        &self,
        action: AuditAction,
        actor: &Actor,
        target_id: Uuid,
        description: String,
    ) {
        if let Some(audit) = &self.audit_service {
            audit
                .record(action, actor.id, targets::RENTALS, target_id, description)
                .await;
        }
    }

    /// Book a car for a date range
    ///
    /// Runs the full admission pipeline: date order, availability of the
    /// car across the requested closed interval, existence of the car
    /// and the booking user, and the concurrent-rental cap (checked
    /// against the requesting actor; admins are exempt). The price is
    /// derived from the car's daily price, the inclusive day count and
    /// the tiered discount.
    pub async fn create_rental(&self, request: CreateRental, actor: &Actor) -> DomainResult<Rental> {
        AdmissionPolicy::<R>::validate_range(request.start_date, request.end_date)?;

        if self
            .availability
            .has_overlap(request.car_id, request.start_date, request.end_date, None)
            .await?
        {
            return Err(RentalError::BookingConflict.into());
        }

        let car = self
            .car_repository
            .find_by_id(request.car_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car"))?;

        if !self.admission.can_admit(actor.id, actor.role).await? {
            return Err(RentalError::RentalLimitExceeded {
                limit: self.admission.max_active(),
            }
            .into());
        }

        let owner_id = request.user_id.unwrap_or(actor.id);
        self.user_repository
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let days = pricing::total_days(request.start_date, request.end_date);
        let price = pricing::price_after_discount(car.price_per_day * days as f64, request.discount);

        let mut rental = Rental::new(
            request.car_id,
            owner_id,
            request.start_date,
            request.end_date,
            days,
            price,
            request.discount,
        );
        if let Some(coupon_name) = request.coupon_name {
            rental = rental.with_coupon(coupon_name, request.max_discount.unwrap_or(0.0));
        }

        // The store's guarded insert is the backstop against concurrent
        // creates that both passed the overlap check above.
        let rental = self.rental_repository.create(rental).await?;

        self.ledger
            .apply(owner_id, rental.total_price, rental.counts_toward_year())
            .await?;

        info!(rental_id = %rental.id, car_id = %rental.car_id, user_id = %owner_id, "created rental");
        self.audit(
            AuditAction::Create,
            actor,
            rental.id,
            format!("Create renting id {}.", rental.id),
        )
        .await;

        Ok(rental)
    }

    /// Update a rental's car, dates, discount or yearly inclusion
    ///
    /// Re-validates the merged date range and, when the car or the dates
    /// changed, re-checks availability excluding the rental's own row.
    /// For rentals included in the yearly total, the price is recomputed
    /// against the effective car with the discount as stored before this
    /// update, and the ledger swaps the old contribution for the new one;
    /// a new discount takes effect from the next repricing onward.
    /// Flipping the inclusion moves the rental's price into or out of
    /// `total_payment_this_year`.
    pub async fn update_rental(
        &self,
        rental_id: Uuid,
        changes: UpdateRental,
        actor: &Actor,
    ) -> DomainResult<Rental> {
        let mut rental = self
            .rental_repository
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental"))?;

        if !actor.may_manage(&rental) {
            return Err(DomainError::Unauthorized);
        }

        let effective_car_id = changes.car_id.unwrap_or(rental.car_id);
        let effective_start = changes.start_date.unwrap_or(rental.start_date);
        let effective_end = changes.end_date.unwrap_or(rental.end_date);

        AdmissionPolicy::<R>::validate_range(effective_start, effective_end)?;

        let car_changed = effective_car_id != rental.car_id;
        let dates_changed =
            effective_start != rental.start_date || effective_end != rental.end_date;

        if (car_changed || dates_changed)
            && self
                .availability
                .has_overlap(effective_car_id, effective_start, effective_end, Some(rental.id))
                .await?
        {
            return Err(RentalError::BookingConflict.into());
        }

        let car = self
            .car_repository
            .find_by_id(effective_car_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car"))?;

        // Repricing keyed off the rental's inclusion flag as it was
        // before this update, matching the ledger contribution on file.
        if rental.counts_toward_year() {
            let old_price = rental.total_price;
            rental.total_days = pricing::total_days(effective_start, effective_end);
            rental.total_price = pricing::price_after_discount(
                car.price_per_day * rental.total_days as f64,
                rental.discount,
            );
            self.ledger
                .replace(rental.user_id, old_price, rental.total_price, true)
                .await?;
        }

        rental.car_id = effective_car_id;
        rental.start_date = effective_start;
        rental.end_date = effective_end;
        if let Some(discount) = changes.discount {
            rental.discount = discount;
        }
        if let Some(inclusion) = changes.inclusion {
            if inclusion != rental.inclusion {
                self.ledger
                    .shift_yearly(
                        rental.user_id,
                        rental.total_price,
                        inclusion == YearlyInclusion::Included,
                    )
                    .await?;
            }
            rental.inclusion = inclusion;
        }
        rental.updated_at = Utc::now();

        let rental = self.rental_repository.update(rental).await?;

        info!(rental_id = %rental.id, "updated rental");
        self.audit(
            AuditAction::Update,
            actor,
            rental.id,
            format!("Update renting id {}.", rental.id),
        )
        .await;

        Ok(rental)
    }

    /// Delete a rental, reversing its ledger contribution
    pub async fn delete_rental(&self, rental_id: Uuid, actor: &Actor) -> DomainResult<()> {
        let rental = self
            .rental_repository
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental"))?;

        if !actor.may_manage(&rental) {
            return Err(DomainError::Unauthorized);
        }

        self.ledger
            .reverse(rental.user_id, rental.total_price, rental.counts_toward_year())
            .await?;
        self.rental_repository.delete(rental.id).await?;

        info!(rental_id = %rental.id, "deleted rental");
        self.audit(
            AuditAction::Delete,
            actor,
            rental.id,
            format!("Delete renting id {}.", rental.id),
        )
        .await;

        Ok(())
    }

    /// Force a rental into the `Finished` state
    ///
    /// Unconditional and idempotent: finishing an already finished
    /// rental persists and audits again but changes nothing.
    pub async fn finish_rental(&self, rental_id: Uuid, actor: &Actor) -> DomainResult<Rental> {
        let mut rental = self
            .rental_repository
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental"))?;

        rental.finish();
        let rental = self.rental_repository.update(rental).await?;

        info!(rental_id = %rental.id, "finished rental");
        self.audit(
            AuditAction::Update,
            actor,
            rental.id,
            format!("Changed the status of renting id {} to finished.", rental.id),
        )
        .await;

        Ok(rental)
    }

    /// List rentals visible to the actor, car/user fields projected
    ///
    /// Plain users see their own rentals; admins see everything. With a
    /// car filter, that car's rentals are returned regardless of owner.
    /// Before the read, every `Confirmed` rental whose end date has
    /// passed is swept to `Finished` in the store.
    pub async fn list_rentals(
        &self,
        actor: &Actor,
        car_filter: Option<Uuid>,
    ) -> DomainResult<Vec<RentalDetails>> {
        let today = Utc::now().date_naive();
        self.rental_repository.finish_expired(today).await?;

        let rentals = match car_filter {
            Some(car_id) => self.rental_repository.find_by_car(car_id).await?,
            None if actor.is_admin() => self.rental_repository.find_all().await?,
            None => self.rental_repository.find_by_user(actor.id).await?,
        };

        self.project(rentals, today).await
    }

    /// Load a single rental with projected fields
    pub async fn get_rental(&self, rental_id: Uuid, actor: &Actor) -> DomainResult<RentalDetails> {
        let rental = self
            .rental_repository
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental"))?;

        if !actor.may_manage(&rental) {
            return Err(DomainError::Unauthorized);
        }

        let today = Utc::now().date_naive();
        let mut details = self.project(vec![rental], today).await?;
        Ok(details.remove(0))
    }

    /// Delete every rental of a car, reversing each ledger contribution
    ///
    /// Cascade hook used when a car is removed from the fleet. Returns
    /// the number of rentals deleted.
    pub async fn delete_rentals_for_car(&self, car_id: Uuid) -> DomainResult<u64> {
        let rentals = self.rental_repository.find_by_car(car_id).await?;
        let mut deleted = 0;
        for rental in rentals {
            self.ledger
                .reverse(rental.user_id, rental.total_price, rental.counts_toward_year())
                .await?;
            if self.rental_repository.delete(rental.id).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Project rentals with car and user summary fields, applying the
    /// derived status uniformly at read time
    async fn project(&self, rentals: Vec<Rental>, today: NaiveDate) -> DomainResult<Vec<RentalDetails>> {
        let mut cars: HashMap<Uuid, Option<Car>> = HashMap::new();
        let mut user_names: HashMap<Uuid, Option<String>> = HashMap::new();
        let mut details = Vec::with_capacity(rentals.len());

        for mut rental in rentals {
            rental.status = rental.effective_status(today);

            if !cars.contains_key(&rental.car_id) {
                let car = self.car_repository.find_by_id(rental.car_id).await?;
                cars.insert(rental.car_id, car);
            }
            if !user_names.contains_key(&rental.user_id) {
                let name = self
                    .user_repository
                    .find_by_id(rental.user_id)
                    .await?
                    .map(|u| u.name);
                user_names.insert(rental.user_id, name);
            }

            let car = cars[&rental.car_id].as_ref().map(|c| CarSummary {
                name: c.name.clone(),
                vin_plate: c.vin_plate.clone(),
                price_per_day: c.price_per_day,
            });
            let user_name = user_names[&rental.user_id].clone();

            details.push(RentalDetails {
                rental,
                car,
                user_name,
            });
        }

        Ok(details)
    }
}
