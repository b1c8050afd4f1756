use crate::error::Result;
use crate::models::SavedTour;
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// Saved-tour fields as read back from either backend.
pub(super) struct RawSavedTourRow {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub destinations: Vec<String>,
    pub created_at: OffsetDateTime,
}

impl RawSavedTourRow {
    pub fn into_saved_tour(self) -> SavedTour {
        let destinations: Vec<String> = self
            .destinations
            .into_iter()
            .filter(|d| {
                let keep = !d.trim().is_empty();
                if !keep {
                    tracing::warn!("Dropping blank destination from saved tour {}", self.id);
                }
                keep
            })
            .collect();

        SavedTour {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            destinations,
            created_at: self.created_at,
        }
    }
}

/// Storage for the per-user saved-tour list.
#[async_trait]
pub trait TourRepository: Send + Sync {
    async fn create(&self, tour: &SavedTour) -> Result<()>;

    /// Tours owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedTour>>;

    /// Deletes the tour only when `user_id` owns it. Returns whether a row went away.
    async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool>;

    async fn health_check(&self) -> bool;

    fn backend_name(&self) -> &'static str;
}

#[derive(sqlx::FromRow)]
struct PgSavedTourRow {
    id: Uuid,
    user_id: String,
    title: String,
    destinations: Vec<String>,
    created_at: OffsetDateTime,
}

pub struct PgTourRepository {
    pool: sqlx::PgPool,
}

impl PgTourRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourRepository for PgTourRepository {
    async fn create(&self, tour: &SavedTour) -> Result<()> {
        sqlx::query(
            "INSERT INTO saved_tours (id, user_id, title, destinations, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(tour.id)
        .bind(&tour.user_id)
        .bind(&tour.title)
        .bind(&tour.destinations)
        .bind(tour.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedTour>> {
        let rows: Vec<PgSavedTourRow> = sqlx::query_as(
            "SELECT id, user_id, title, destinations, created_at
             FROM saved_tours
             WHERE user_id = $1
             ORDER BY created_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                RawSavedTourRow {
                    id: row.id,
                    user_id: row.user_id,
                    title: row.title,
                    destinations: row.destinations,
                    created_at: row.created_at,
                }
                .into_saved_tour()
            })
            .collect())
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM saved_tours WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
