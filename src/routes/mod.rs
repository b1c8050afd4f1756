pub mod assistant;
pub mod catalog;
pub mod debug;
pub mod geocode;
pub mod partners;
pub mod pricing;
pub mod saved_tours;
pub mod tours;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tours/generate", post(tours::generate_tour))
        .route("/tours/map", post(tours::map_view))
        .route("/tours/narration", post(tours::narration))
        .route(
            "/tours/saved",
            get(saved_tours::list_saved_tours).post(saved_tours::save_tour),
        )
        .route("/tours/saved/{id}", delete(saved_tours::delete_saved_tour))
        .route("/assistant/chat", post(assistant::chat))
        .route("/vehicles", get(catalog::list_vehicles))
        .route("/refill-stations", get(catalog::list_refill_stations))
        .route("/geocode/reverse", get(geocode::reverse_geocode))
        .route("/pricing", get(pricing::list_pricing))
        .route("/partners/applications", post(partners::submit_application))
        .route(
            "/partners/applications/{id}",
            get(partners::get_application),
        )
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
