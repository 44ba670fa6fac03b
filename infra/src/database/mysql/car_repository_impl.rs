//! MySQL implementation of the CarRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rw_core::domain::entities::car::Car;
use rw_core::errors::DomainError;
use rw_core::repositories::car::CarRepository;

const CAR_COLUMNS: &str = "id, name, vin_plate, provider_id, picture_url, capacity, \
     description, price_per_day, average_rating, created_at";

/// MySQL implementation of CarRepository
pub struct MySqlCarRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCarRepository {
    /// Create a new MySQL car repository
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

    /// Convert database row to Car entity
    fn row_to_car(row: &sqlx::mysql::MySqlRow) -> Result<Car, DomainError> {
        let id: String = Self::column(row, "id")?;
        let provider_id: String = Self::column(row, "provider_id")?;
        let capacity: i64 = Self::column(row, "capacity")?;

        Ok(Car {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            name: Self::column(row, "name")?,
            vin_plate: Self::column(row, "vin_plate")?,
            provider_id: Uuid::parse_str(&provider_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid provider UUID: {}", e),
            })?,
            picture_url: Self::column(row, "picture_url")?,
            capacity: capacity as u32,
            description: Self::column(row, "description")?,
            price_per_day: Self::column::<f64>(row, "price_per_day")?,
            average_rating: Self::column::<Option<f64>>(row, "average_rating")?,
            created_at: Self::column::<DateTime<Utc>>(row, "created_at")?,
        })
    }
}

#[async_trait]
impl CarRepository for MySqlCarRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, DomainError> {
        let query = format!("SELECT {} FROM cars WHERE id = ?", CAR_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find car: {}", e),
            })?;

        row.as_ref().map(Self::row_to_car).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Car>, DomainError> {
        let query = format!("SELECT {} FROM cars ORDER BY created_at DESC", CAR_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to list cars: {}", e),
            })?;

        rows.iter().map(Self::row_to_car).collect()
    }

    async fn find_by_vin(&self, vin_plate: &str) -> Result<Option<Car>, DomainError> {
        let query = format!("SELECT {} FROM cars WHERE vin_plate = ?", CAR_COLUMNS);

        let row = sqlx::query(&query)
            .bind(vin_plate)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find car by VIN: {}", e),
            })?;

        row.as_ref().map(Self::row_to_car).transpose()
    }

    async fn create(&self, car: Car) -> Result<Car, DomainError> {
        let query = r#"
            INSERT INTO cars (
                id, name, vin_plate, provider_id, picture_url,
                capacity, description, price_per_day, average_rating, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(car.id.to_string())
            .bind(&car.name)
            .bind(&car.vin_plate)
            .bind(car.provider_id.to_string())
            .bind(&car.picture_url)
            .bind(car.capacity as i64)
            .bind(&car.description)
            .bind(car.price_per_day)
            .bind(car.average_rating)
            .bind(car.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                // Unique index on vin_plate
                Some(db) if db.is_unique_violation() => DomainError::Validation {
                    message: format!("VIN plate {} is already registered", car.vin_plate),
                },
                _ => DomainError::Internal {
                    message: format!("Failed to create car: {}", e),
                },
            })?;

        Ok(car)
    }

    async fn update(&self, car: Car) -> Result<Car, DomainError> {
        let query = r#"
            UPDATE cars
            SET name = ?, picture_url = ?, capacity = ?,
                description = ?, price_per_day = ?, average_rating = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&car.name)
            .bind(&car.picture_url)
            .bind(car.capacity as i64)
            .bind(&car.description)
            .bind(car.price_per_day)
            .bind(car.average_rating)
            .bind(car.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update car: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Car"));
        }

        Ok(car)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete car: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
