// Library exports for testing and reusability

pub mod auth;
pub mod cache;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use auth::JwtKeys;
use cache::ItineraryCache;
use db::{PartnerRepository, TourRepository};
use services::assistant::TravelAssistant;
use services::catalog::Catalog;
use services::geocoding::ReverseGeocoder;
use services::tour_generator::TourGenerator;
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub tour_generator: TourGenerator,
    pub tour_repo: Arc<dyn TourRepository>,
    pub partner_repo: Arc<dyn PartnerRepository>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub assistant: TravelAssistant,
    pub catalog: Catalog,
    pub cache: Option<Arc<dyn ItineraryCache>>,
    pub jwt: JwtKeys,
}
