use crate::error::Result;
use crate::models::{PartnerApplication, VehicleType};
use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

/// Application fields as read back from either backend.
pub(super) struct RawPartnerRow {
    pub id: Uuid,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub vehicle_types: Vec<String>,
    pub vehicle_count: i64,
    pub commission: f64,
    pub created_at: OffsetDateTime,
}

impl RawPartnerRow {
    pub fn into_application(self) -> PartnerApplication {
        let vehicle_types = self
            .vehicle_types
            .iter()
            .filter_map(|t| match t.parse::<VehicleType>() {
                Ok(vt) => Some(vt),
                Err(e) => {
                    tracing::warn!("{} on partner application {}, skipping", e, self.id);
                    None
                }
            })
            .collect();

        let vehicle_count = u32::try_from(self.vehicle_count).unwrap_or_else(|_| {
            tracing::warn!(
                "Vehicle count {} out of range for partner application {}",
                self.vehicle_count,
                self.id
            );
            0
        });

        PartnerApplication {
            id: self.id,
            business_name: self.business_name,
            owner_name: self.owner_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            vehicle_types,
            vehicle_count,
            commission: self.commission,
            created_at: self.created_at,
        }
    }
}

pub(super) fn vehicle_type_names(application: &PartnerApplication) -> Vec<String> {
    application
        .vehicle_types
        .iter()
        .map(VehicleType::to_string)
        .collect()
}

/// Storage for rental-partner applications.
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn create(&self, application: &PartnerApplication) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PartnerApplication>>;
}

#[derive(sqlx::FromRow)]
struct PgPartnerRow {
    id: Uuid,
    business_name: String,
    owner_name: String,
    email: String,
    phone: String,
    address: String,
    vehicle_types: Vec<String>,
    vehicle_count: i32,
    commission: f64,
    created_at: OffsetDateTime,
}

pub struct PgPartnerRepository {
    pool: sqlx::PgPool,
}

impl PgPartnerRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartnerRepository for PgPartnerRepository {
    async fn create(&self, application: &PartnerApplication) -> Result<()> {
        sqlx::query(
            "INSERT INTO partner_applications
                (id, business_name, owner_name, email, phone, address,
                 vehicle_types, vehicle_count, commission, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(application.id)
        .bind(&application.business_name)
        .bind(&application.owner_name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.address)
        .bind(vehicle_type_names(application))
        .bind(application.vehicle_count as i32)
        .bind(application.commission)
        .bind(application.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PartnerApplication>> {
        let row: Option<PgPartnerRow> = sqlx::query_as(
            "SELECT id, business_name, owner_name, email, phone, address,
                    vehicle_types, vehicle_count, commission, created_at
             FROM partner_applications
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            RawPartnerRow {
                id: r.id,
                business_name: r.business_name,
                owner_name: r.owner_name,
                email: r.email,
                phone: r.phone,
                address: r.address,
                vehicle_types: r.vehicle_types,
                vehicle_count: i64::from(r.vehicle_count),
                commission: r.commission,
                created_at: r.created_at,
            }
            .into_application()
        }))
    }
}
