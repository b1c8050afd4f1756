use crate::error::Result;
use crate::models::{Itinerary, UserPreferences};
use crate::services::map_view::{build_map_view, MapView, MapViewRequest};
use crate::services::narration::{narrate, Narration, NarrationRequest};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /tours/generate
/// Generate an itinerary from the user's preferences
pub async fn generate_tour(
    State(state): State<Arc<AppState>>,
    Json(prefs): Json<UserPreferences>,
) -> Result<Json<Itinerary>> {
    tracing::info!(
        location = %prefs.location,
        duration_hours = prefs.duration,
        mode = %prefs.transport_mode,
        "Tour request: {} for {}h by {}",
        prefs.location,
        prefs.duration,
        prefs.transport_mode
    );

    let itinerary = state.tour_generator.generate(&prefs).await?;
    Ok(Json(itinerary))
}

/// POST /tours/map
pub async fn map_view(Json(request): Json<MapViewRequest>) -> Result<Json<MapView>> {
    Ok(Json(build_map_view(&request)?))
}

/// POST /tours/narration
pub async fn narration(Json(request): Json<NarrationRequest>) -> Result<Json<Narration>> {
    Ok(Json(narrate(&request)?))
}
