//! Stable application-wide constants.
//!
//! Values here are structural limits, heuristic parameters, and default
//! fallbacks for env-var-based configuration. Tunables that operators may
//! want to change per deployment live on [`Config`](crate::config::Config).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- External service defaults ---

/// OpenAI-compatible chat completion endpoint root. Overridden by `LLM_BASE_URL`.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
/// Overridden by `LLM_MODEL`.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4";
/// Overridden by `LLM_TEMPERATURE`.
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.7;
/// Nominatim-compatible reverse geocoder. Overridden by `GEOCODER_BASE_URL`.
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Outbound HTTP request timeout. Overridden by `HTTP_TIMEOUT_SECS`.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 60;
/// User agent sent to public APIs that require one (Nominatim).
pub const USER_AGENT: &str = concat!("tourplanner/", env!("CARGO_PKG_VERSION"));

// --- Cache TTL defaults (seconds, used when env vars are absent) ---

/// Generated itineraries: 1 hour. Overridden by `ITINERARY_CACHE_TTL`.
pub const DEFAULT_ITINERARY_CACHE_TTL_SECONDS: u64 = 3_600;
/// Idle chat sessions are dropped after 30 minutes. Overridden by `CHAT_SESSION_TTL`.
pub const DEFAULT_CHAT_SESSION_TTL_SECONDS: u64 = 1_800;
/// Maximum entries for the in-memory itinerary cache.
pub const DEFAULT_MEMORY_CACHE_MAX_ENTRIES: u64 = 1_000;
/// Maximum concurrent chat sessions held in memory.
pub const MAX_CHAT_SESSIONS: u64 = 10_000;

// --- Request limits ---

/// Longest tour a single request may ask for.
pub const MAX_TOUR_DURATION_HOURS: f64 = 24.0;
/// Upper bound on interest tags per request.
pub const MAX_INTERESTS: usize = 20;
pub const MAX_CHAT_MESSAGE_CHARS: usize = 2_000;
/// Longest visit, leg or tour a generated itinerary may state, in minutes.
pub const MAX_ITINERARY_MINUTES: u32 = 24 * 60;

// --- Chat assistant ---

/// Longest trip the canned planner will lay out, in days.
pub const MAX_ASSISTANT_TRIP_DAYS: u32 = 30;

// --- Geometric post-processing ---

/// Food spots farther than this from every route stop are dropped.
/// Overridden by `FOOD_SPOT_RADIUS_KM`.
pub const DEFAULT_FOOD_SPOT_RADIUS_KM: f64 = 0.5;

// --- Meal-slot heuristic (minutes since midnight) ---

/// Tours are assumed to start at 09:00.
pub const TOUR_START_MINUTE: u32 = 9 * 60;
pub const LUNCH_WINDOW_START_MINUTE: u32 = 12 * 60;
pub const LUNCH_WINDOW_END_MINUTE: u32 = 14 * 60;
pub const DINNER_WINDOW_START_MINUTE: u32 = 18 * 60;
pub const DINNER_WINDOW_END_MINUTE: u32 = 20 * 60;
/// Dinner is only suggested for tours longer than this.
pub const DINNER_MIN_TOUR_MINUTES: u32 = 8 * 60;

// --- Map view ---

/// Zoom level for a whole-tour view.
pub const DEFAULT_MAP_ZOOM: u8 = 13;
/// Zoom level when a single place is focused.
pub const FOCUSED_MAP_ZOOM: u8 = 16;

// --- Narration ---

/// Longest text handed to the browser speech engine in one utterance.
pub const NARRATION_CHUNK_MAX_CHARS: usize = 200;

// --- Saved tours ---

pub const DEFAULT_TOUR_TITLE: &str = "My Tour";

// --- Pricing ---

/// Yearly billing discount as a fraction of the monthly-equivalent price.
pub const YEARLY_DISCOUNT: f64 = 0.20;

// --- Rental partners ---

/// Commission the platform takes on each partner booking, in percent.
pub const PARTNER_COMMISSION_PERCENT: f64 = 10.0;
/// Upper bound on the fleet size a single application may declare.
pub const MAX_PARTNER_VEHICLES: u32 = 10_000;
