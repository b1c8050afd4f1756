use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{PartnerApplication, SavedTour};

use super::partner_repository::{vehicle_type_names, PartnerRepository, RawPartnerRow};
use super::tour_repository::{RawSavedTourRow, TourRepository};

/// Create the `saved_tours` and `partner_applications` tables. Idempotent.
pub async fn create_schema(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS saved_tours (
            rowid INTEGER PRIMARY KEY,
            id TEXT UNIQUE NOT NULL,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            destinations TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_saved_tours_user_created
         ON saved_tours(user_id, created_at)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS partner_applications (
            id TEXT PRIMARY KEY,
            business_name TEXT NOT NULL,
            owner_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            address TEXT NOT NULL,
            vehicle_types TEXT NOT NULL,
            vehicle_count INTEGER NOT NULL CHECK (vehicle_count > 0),
            commission REAL NOT NULL,
            created_at INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn unix_nanos(at: OffsetDateTime) -> Result<i64> {
    i64::try_from(at.unix_timestamp_nanos())
        .map_err(|_| AppError::InvalidRequest("timestamp is out of range".to_string()))
}

fn from_unix_nanos(nanos: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(nanos as i128).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn parse_id(raw: &str, what: &str) -> Uuid {
    raw.parse::<Uuid>().unwrap_or_else(|_| {
        tracing::warn!("Invalid UUID '{}' for {}, using nil", raw, what);
        Uuid::nil()
    })
}

// ---------------------------------------------------------------------------
// Saved tours
// ---------------------------------------------------------------------------

// Destinations are stored as a JSON array, timestamps as unix nanoseconds.
#[derive(sqlx::FromRow)]
struct SqliteSavedTourRow {
    id: String,
    user_id: String,
    title: String,
    destinations: String,
    created_at: i64,
}

impl SqliteSavedTourRow {
    fn into_saved_tour(self) -> SavedTour {
        let id = parse_id(&self.id, "saved tour");

        let destinations = serde_json::from_str(&self.destinations).unwrap_or_else(|e| {
            tracing::error!("Unreadable destinations for saved tour {}: {}", id, e);
            Vec::new()
        });

        RawSavedTourRow {
            id,
            user_id: self.user_id,
            title: self.title,
            destinations,
            created_at: from_unix_nanos(self.created_at),
        }
        .into_saved_tour()
    }
}

pub struct SqliteTourRepository {
    pool: SqlitePool,
}

impl SqliteTourRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourRepository for SqliteTourRepository {
    async fn create(&self, tour: &SavedTour) -> Result<()> {
        let destinations = serde_json::to_string(&tour.destinations)
            .map_err(|e| AppError::Internal(format!("Failed to encode destinations: {}", e)))?;
        let created_at = unix_nanos(tour.created_at)?;

        sqlx::query(
            "INSERT INTO saved_tours (id, user_id, title, destinations, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(tour.id.to_string())
        .bind(&tour.user_id)
        .bind(&tour.title)
        .bind(destinations)
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedTour>> {
        let rows: Vec<SqliteSavedTourRow> = sqlx::query_as(
            "SELECT id, user_id, title, destinations, created_at
             FROM saved_tours
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_saved_tour()).collect())
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM saved_tours WHERE id = ?1 AND user_id = ?2")
            .bind(id.to_string())
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

// ---------------------------------------------------------------------------
// Partner applications
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct SqlitePartnerRow {
    id: String,
    business_name: String,
    owner_name: String,
    email: String,
    phone: String,
    address: String,
    vehicle_types: String,
    vehicle_count: i64,
    commission: f64,
    created_at: i64,
}

impl SqlitePartnerRow {
    fn into_application(self) -> PartnerApplication {
        let id = parse_id(&self.id, "partner application");
        let vehicle_types = serde_json::from_str(&self.vehicle_types).unwrap_or_else(|e| {
            tracing::error!("Unreadable vehicle types for partner application {}: {}", id, e);
            Vec::new()
        });

        RawPartnerRow {
            id,
            business_name: self.business_name,
            owner_name: self.owner_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            vehicle_types,
            vehicle_count: self.vehicle_count,
            commission: self.commission,
            created_at: from_unix_nanos(self.created_at),
        }
        .into_application()
    }
}

pub struct SqlitePartnerRepository {
    pool: SqlitePool,
}

impl SqlitePartnerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartnerRepository for SqlitePartnerRepository {
    async fn create(&self, application: &PartnerApplication) -> Result<()> {
        let vehicle_types = serde_json::to_string(&vehicle_type_names(application))
            .map_err(|e| AppError::Internal(format!("Failed to encode vehicle types: {}", e)))?;

        sqlx::query(
            "INSERT INTO partner_applications
                (id, business_name, owner_name, email, phone, address,
                 vehicle_types, vehicle_count, commission, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(application.id.to_string())
        .bind(&application.business_name)
        .bind(&application.owner_name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.address)
        .bind(vehicle_types)
        .bind(i64::from(application.vehicle_count))
        .bind(application.commission)
        .bind(unix_nanos(application.created_at)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PartnerApplication>> {
        let row: Option<SqlitePartnerRow> = sqlx::query_as(
            "SELECT id, business_name, owner_name, email, phone, address,
                    vehicle_types, vehicle_count, commission, created_at
             FROM partner_applications
             WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SqlitePartnerRow::into_application))
    }
}

#[cfg(test)]
#[path = "sqlite_repo_tests.rs"]
mod sqlite_repo_tests;
