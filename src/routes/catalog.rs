use crate::error::Result;
use crate::models::{RefillStation, Vehicle};
use crate::services::catalog::{RefillStationFilter, VehicleFilter};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

/// GET /vehicles?search=&type=&minPrice=&maxPrice=
pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<VehicleFilter>,
) -> Result<Json<Vec<Vehicle>>> {
    Ok(Json(state.catalog.find_vehicles(&filter)?))
}

/// GET /refill-stations?search=
pub async fn list_refill_stations(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RefillStationFilter>,
) -> Json<Vec<RefillStation>> {
    Json(state.catalog.find_refill_stations(&filter))
}
