use crate::error::{AppError, Result};
use crate::models::{NewPartnerApplication, PartnerApplication};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// POST /partners/applications
pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewPartnerApplication>,
) -> Result<(StatusCode, Json<PartnerApplication>)> {
    request.validate().map_err(AppError::InvalidRequest)?;

    let application = request.into_application();
    state.partner_repo.create(&application).await?;

    tracing::info!(
        application = %application.id,
        vehicles = application.vehicle_count,
        "Partner application from '{}'",
        application.business_name
    );
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /partners/applications/{id}
pub async fn get_application(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PartnerApplication>> {
    state
        .partner_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Partner application {} not found", id)))
}
