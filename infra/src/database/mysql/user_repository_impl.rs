//! MySQL implementation of the UserRepository trait.
//!
//! The payment totals are written only through relative increments so
//! concurrent bookings for the same user serialize at the row level
//! instead of losing updates to read-modify-write races.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rw_core::domain::entities::user::{User, UserRole};
use rw_core::errors::DomainError;
use rw_core::repositories::user::UserRepository;

const USER_COLUMNS: &str = "id, name, email, tel, password_hash, role, \
     total_payment, total_payment_this_year, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
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

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = Self::column(row, "id")?;
        let role_str: String = Self::column(row, "role")?;

        let role = UserRole::parse(&role_str).ok_or_else(|| DomainError::Internal {
            message: format!("Unknown user role: {}", role_str),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            name: Self::column(row, "name")?,
            email: Self::column(row, "email")?,
            tel: Self::column(row, "tel")?,
            password_hash: Self::column(row, "password_hash")?,
            role,
            total_payment: Self::column::<f64>(row, "total_payment")?,
            total_payment_this_year: Self::column::<f64>(row, "total_payment_this_year")?,
            created_at: Self::column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: Self::column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by email: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, tel, password_hash, role,
                total_payment, total_payment_this_year, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.tel)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.total_payment)
            .bind(user.total_payment_this_year)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                // Unique index on email
                Some(db) if db.is_unique_violation() => DomainError::Validation {
                    message: format!("Email {} is already registered", user.email),
                },
                _ => DomainError::Internal {
                    message: format!("Failed to create user: {}", e),
                },
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET name = ?, email = ?, tel = ?, password_hash = ?,
                role = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.tel)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }

        Ok(user)
    }

    async fn adjust_payment_totals(
        &self,
        user_id: Uuid,
        total_delta: f64,
        yearly_delta: f64,
    ) -> Result<(), DomainError> {
        // Single relative-increment statement; the row lock serializes
        // concurrent adjustments for the same user.
        let result = sqlx::query(
            "UPDATE users \
             SET total_payment = total_payment + ?, \
                 total_payment_this_year = total_payment_this_year + ?, \
                 updated_at = NOW(6) \
             WHERE id = ?",
        )
        .bind(total_delta)
        .bind(yearly_delta)
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to adjust payment totals: {}", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }

        Ok(())
    }
}
