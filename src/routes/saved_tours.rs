use crate::auth::AuthenticatedUser;
use crate::error::{AppError, Result};
use crate::models::{SaveTourRequest, SavedTour};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// GET /tours/saved
/// The caller's saved tours, newest first
pub async fn list_saved_tours(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<SavedTour>>> {
    let tours = state.tour_repo.list_for_user(&user.user_id).await?;
    tracing::debug!(user = %user.user_id, count = tours.len(), "Listed saved tours");
    Ok(Json(tours))
}

/// POST /tours/saved
/// Accepts `{title?, destinations}` or a generated itinerary
pub async fn save_tour(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(request): Json<SaveTourRequest>,
) -> Result<(StatusCode, Json<SavedTour>)> {
    let request = request.into_summary();
    request.validate().map_err(AppError::InvalidRequest)?;

    let tour = request.into_saved(&user.user_id);
    state.tour_repo.create(&tour).await?;

    tracing::info!(user = %user.user_id, tour = %tour.id, "Saved tour '{}'", tour.title);
    Ok((StatusCode::CREATED, Json(tour)))
}

/// DELETE /tours/saved/{id}
/// Tours owned by someone else look the same as missing ones.
pub async fn delete_saved_tour(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.tour_repo.delete(&user.user_id, id).await? {
        tracing::info!(user = %user.user_id, tour = %id, "Deleted saved tour");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Saved tour {} not found", id)))
    }
}
