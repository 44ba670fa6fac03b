//! MySQL implementation of the RentalRepository trait.
//!
//! Rentals are the contended table of the system. The `create`
//! implementation is a guarded insert: the overlap predicate runs inside
//! the same statement as the insert, so two concurrent bookings of the
//! same car with intersecting ranges cannot both commit.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rw_core::domain::entities::rental::{Rental, RentalStatus, YearlyInclusion};
use rw_core::errors::{DomainError, RentalError};
use rw_core::repositories::rental::RentalRepository;

const RENTAL_COLUMNS: &str = "id, car_id, user_id, issued_at, start_date, end_date, \
     total_days, total_price, discount, max_discount, coupon_name, \
     status, inclusion, created_at, updated_at";

/// MySQL implementation of RentalRepository
pub struct MySqlRentalRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRentalRepository {
    /// Create a new MySQL rental repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(name).map_err(|e| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        })
    }

    fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(value).map_err(|e| DomainError::Internal {
            message: format!("Invalid UUID: {}", e),
        })
    }

    /// Convert database row to Rental entity
    fn row_to_rental(row: &sqlx::mysql::MySqlRow) -> Result<Rental, DomainError> {
        let id: String = Self::column(row, "id")?;
        let car_id: String = Self::column(row, "car_id")?;
        let user_id: String = Self::column(row, "user_id")?;
        let status_str: String = Self::column(row, "status")?;
        let inclusion_str: String = Self::column(row, "inclusion")?;

        let status = RentalStatus::parse(&status_str).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown rental status: {}", status_str),
        })?;
        let inclusion =
            YearlyInclusion::parse(&inclusion_str).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown yearly inclusion: {}", inclusion_str),
            })?;

        Ok(Rental {
            id: Self::parse_uuid(&id)?,
            car_id: Self::parse_uuid(&car_id)?,
            user_id: Self::parse_uuid(&user_id)?,
            issued_at: Self::column::<NaiveDate>(row, "issued_at")?,
            start_date: Self::column::<NaiveDate>(row, "start_date")?,
            end_date: Self::column::<NaiveDate>(row, "end_date")?,
            total_days: Self::column::<i64>(row, "total_days")?,
            total_price: Self::column::<f64>(row, "total_price")?,
            discount: Self::column::<f64>(row, "discount")?,
            max_discount: Self::column::<f64>(row, "max_discount")?,
            coupon_name: Self::column(row, "coupon_name")?,
            status,
            inclusion,
            created_at: Self::column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: Self::column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl RentalRepository for MySqlRentalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError> {
        let query = format!("SELECT {} FROM rentals WHERE id = ?", RENTAL_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find rental: {}", e),
            })?;

        row.as_ref().map(Self::row_to_rental).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Rental>, DomainError> {
        let query = format!(
            "SELECT {} FROM rentals ORDER BY created_at DESC",
            RENTAL_COLUMNS
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to list rentals: {}", e),
            })?;

        rows.iter().map(Self::row_to_rental).collect()
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Rental>, DomainError> {
        let query = format!(
            "SELECT {} FROM rentals WHERE user_id = ? ORDER BY created_at DESC",
            RENTAL_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find rentals by user: {}", e),
            })?;

        rows.iter().map(Self::row_to_rental).collect()
    }

    async fn find_by_car(&self, car_id: Uuid) -> Result<Vec<Rental>, DomainError> {
        let query = format!(
            "SELECT {} FROM rentals WHERE car_id = ? ORDER BY created_at DESC",
            RENTAL_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(car_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find rentals by car: {}", e),
            })?;

        rows.iter().map(Self::row_to_rental).collect()
    }

    async fn find_overlapping(
        &self,
        car_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Rental>, DomainError> {
        // Closed intervals intersect when each starts no later than the
        // other ends.
        let query = format!(
            "SELECT {} FROM rentals \
             WHERE car_id = ? AND start_date <= ? AND end_date >= ? \
             AND (? IS NULL OR id <> ?)",
            RENTAL_COLUMNS
        );
        let exclude = exclude.map(|id| id.to_string());

        let rows = sqlx::query(&query)
            .bind(car_id.to_string())
            .bind(end)
            .bind(start)
            .bind(&exclude)
            .bind(&exclude)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find overlapping rentals: {}", e),
            })?;

        rows.iter().map(Self::row_to_rental).collect()
    }

    async fn count_by_user_and_status(
        &self,
        user_id: Uuid,
        status: RentalStatus,
    ) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM rentals WHERE user_id = ? AND status = ?",
        )
        .bind(user_id.to_string())
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to count rentals: {}", e),
        })?;

        Ok(count as u64)
    }

    async fn create(&self, rental: Rental) -> Result<Rental, DomainError> {
        // Guarded insert: the row only lands if no overlapping rental for
        // the car exists at commit time. Zero affected rows means a
        // competing booking won.
        let query = r#"
            INSERT INTO rentals (
                id, car_id, user_id, issued_at, start_date, end_date,
                total_days, total_price, discount, max_discount, coupon_name,
                status, inclusion, created_at, updated_at
            )
            SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
            FROM DUAL
            WHERE NOT EXISTS (
                SELECT 1 FROM rentals
                WHERE car_id = ? AND start_date <= ? AND end_date >= ?
            )
        "#;

        let result = sqlx::query(query)
            .bind(rental.id.to_string())
            .bind(rental.car_id.to_string())
            .bind(rental.user_id.to_string())
            .bind(rental.issued_at)
            .bind(rental.start_date)
            .bind(rental.end_date)
            .bind(rental.total_days)
            .bind(rental.total_price)
            .bind(rental.discount)
            .bind(rental.max_discount)
            .bind(&rental.coupon_name)
            .bind(rental.status.as_str())
            .bind(rental.inclusion.as_str())
            .bind(rental.created_at)
            .bind(rental.updated_at)
            .bind(rental.car_id.to_string())
            .bind(rental.end_date)
            .bind(rental.start_date)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create rental: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(RentalError::BookingConflict.into());
        }

        Ok(rental)
    }

    async fn update(&self, rental: Rental) -> Result<Rental, DomainError> {
        let query = r#"
            UPDATE rentals
            SET car_id = ?, start_date = ?, end_date = ?,
                total_days = ?, total_price = ?, discount = ?,
                max_discount = ?, coupon_name = ?, status = ?,
                inclusion = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(rental.car_id.to_string())
            .bind(rental.start_date)
            .bind(rental.end_date)
            .bind(rental.total_days)
            .bind(rental.total_price)
            .bind(rental.discount)
            .bind(rental.max_discount)
            .bind(&rental.coupon_name)
            .bind(rental.status.as_str())
            .bind(rental.inclusion.as_str())
            .bind(rental.updated_at)
            .bind(rental.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update rental: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Rental"));
        }

        Ok(rental)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete rental: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn finish_expired(&self, today: NaiveDate) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE rentals SET status = ?, updated_at = NOW() \
             WHERE status = ? AND end_date < ?",
        )
        .bind(RentalStatus::Finished.as_str())
        .bind(RentalStatus::Confirmed.as_str())
        .bind(today)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to finish expired rentals: {}", e),
        })?;

        Ok(result.rows_affected())
    }
}
