use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tourplanner::auth::JwtKeys;
use tourplanner::cache::ItineraryCache;
use tourplanner::db::{
    create_sqlite_pool, create_sqlite_schema, SqlitePartnerRepository, SqliteTourRepository,
};
use tourplanner::models::{Coordinates, DistanceKm, Itinerary, TransportMode};
use tourplanner::services::assistant::TravelAssistant;
use tourplanner::services::catalog::Catalog;
use tourplanner::services::geocoding::{location_label, ResolvedLocation, ReverseGeocoder};
use tourplanner::services::llm::CompletionClient;
use tourplanner::services::prompt::TourPrompt;
use tourplanner::services::tour_generator::{assemble_itinerary, TourGenerator};
use tourplanner::services::validation::parse_itinerary;
use tourplanner::{AppError, AppState, Result};

#[allow(dead_code)]
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789";

/// Completion client that returns a fixed reply and counts calls.
#[allow(dead_code)]
pub struct StubCompletion {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
    pub last_prompt: std::sync::Mutex<Option<TourPrompt>>,
}

#[allow(dead_code)]
impl StubCompletion {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(StubCompletion {
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(StubCompletion {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, prompt: &TourPrompt) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.clone());
        self.reply.clone().map_err(AppError::LlmApi)
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

/// Geocoder answering every lookup with the same display name.
#[allow(dead_code)]
pub struct StubGeocoder {
    pub display_name: String,
}

#[async_trait]
impl ReverseGeocoder for StubGeocoder {
    async fn reverse(&self, coordinates: &Coordinates) -> Result<ResolvedLocation> {
        let label = location_label(&self.display_name)
            .ok_or_else(|| AppError::Geocoding("No address found".to_string()))?;
        Ok(ResolvedLocation {
            label,
            display_name: self.display_name.clone(),
            coordinates: *coordinates,
        })
    }
}

/// Application state over an in-memory SQLite store.
#[allow(dead_code)]
pub async fn setup_test_state(
    completion: Arc<StubCompletion>,
    cache: Option<Arc<dyn ItineraryCache>>,
) -> Arc<AppState> {
    let pool = create_sqlite_pool("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite pool");
    create_sqlite_schema(&pool)
        .await
        .expect("Failed to create schema");

    let radius = DistanceKm::new(0.5).unwrap();

    Arc::new(AppState {
        tour_generator: TourGenerator::new(completion.clone(), cache.clone(), radius),
        tour_repo: Arc::new(SqliteTourRepository::new(pool.clone())),
        partner_repo: Arc::new(SqlitePartnerRepository::new(pool)),
        geocoder: Arc::new(StubGeocoder {
            display_name: "Jaipur, Jaipur Tehsil, Rajasthan, 302001, India".to_string(),
        }),
        assistant: TravelAssistant::new(600, Some(completion)),
        catalog: Catalog::jaipur(),
        cache,
        jwt: JwtKeys::new(TEST_JWT_SECRET),
    })
}

#[allow(dead_code)]
pub async fn setup_test_app(completion: Arc<StubCompletion>) -> axum::Router {
    tourplanner::routes::create_router(setup_test_state(completion, None).await)
}

/// `Authorization` header value for `user_id`.
#[allow(dead_code)]
pub fn bearer(user_id: &str) -> String {
    let token = JwtKeys::new(TEST_JWT_SECRET)
        .issue(user_id, None, 3600)
        .unwrap();
    format!("Bearer {}", token)
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A three-stop Paris walk as the model would return it.
///
/// Stops end at 10:00, 11:55 and 12:55, so lunch lands on Notre-Dame. One
/// café sits next to the Louvre, the other is out in Versailles.
#[allow(dead_code)]
pub fn paris_itinerary_json() -> Value {
    json!({
        "title": "Paris Highlights",
        "totalDuration": 235,
        "notes": "Start early to beat the queues",
        "places": [
            {
                "id": "eiffel-tower",
                "name": "Eiffel Tower",
                "description": "Wrought-iron lattice tower on the Champ de Mars",
                "location": [48.8584, 2.2945],
                "duration": 60,
                "type": "landmark",
                "historicalFacts": ["Built for the 1889 World's Fair"],
                "bestTimeToVisit": "Early morning",
                "highlights": ["Summit views"]
            },
            {
                "id": "louvre",
                "name": "Louvre Museum",
                "description": "The world's most-visited art museum",
                "location": [48.8606, 2.3376],
                "duration": 90,
                "type": "museum",
                "historicalFacts": ["Originally a royal palace"],
                "highlights": ["Mona Lisa", "Winged Victory"]
            },
            {
                "id": "notre-dame",
                "name": "Notre-Dame Cathedral",
                "description": "Medieval Gothic cathedral on the Île de la Cité",
                "location": [48.8530, 2.3499],
                "duration": 45,
                "type": "religious"
            }
        ],
        "transportTimes": [25, 15],
        "foodRecommendations": [
            {
                "id": "cafe-marly",
                "name": "Café Marly",
                "description": "Terrace overlooking the pyramid",
                "location": [48.8610, 2.3380],
                "type": "cafe",
                "cuisineTypes": ["French"],
                "priceRange": "expensive",
                "rating": 4.1,
                "reviews": 3200,
                "openingHours": "08:00-02:00"
            },
            {
                "id": "versailles-bistro",
                "name": "Bistro de Versailles",
                "description": "Far from the route",
                "location": [48.8049, 2.1204],
                "type": "restaurant",
                "cuisineTypes": ["French"],
                "priceRange": "moderate",
                "rating": 4.4,
                "reviews": 800
            }
        ],
        "tips": ["Buy a carnet of metro tickets"]
    })
}

/// The Paris walk run through validation and post-processing.
#[allow(dead_code)]
pub fn paris_itinerary() -> Itinerary {
    let generated = parse_itinerary(&paris_itinerary_json().to_string()).unwrap();
    assemble_itinerary(
        generated,
        TransportMode::Walking,
        DistanceKm::new(0.5).unwrap(),
    )
}

#[allow(dead_code)]
pub fn paris_preferences() -> Value {
    json!({
        "location": "Paris",
        "duration": 4,
        "transportMode": "walking",
        "interests": ["history", "art"],
        "budget": "medium",
        "pace": "moderate"
    })
}
