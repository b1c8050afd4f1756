use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::geocoding::ResolvedLocation;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeParams {
    pub lat: f64,
    pub lng: f64,
}

/// GET /geocode/reverse?lat=..&lng=..
/// Resolve the user's position to a short location label
pub async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReverseGeocodeParams>,
) -> Result<Json<ResolvedLocation>> {
    let coordinates = Coordinates::new(params.lat, params.lng).map_err(AppError::InvalidRequest)?;
    Ok(Json(state.geocoder.reverse(&coordinates).await?))
}
