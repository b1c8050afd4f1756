use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tourplanner::auth::JwtKeys;
use tourplanner::cache::{ItineraryCache, MemoryCacheService, RedisCacheService};
use tourplanner::config::Config;
use tourplanner::constants::DEFAULT_MEMORY_CACHE_MAX_ENTRIES;
use tourplanner::db::{
    PartnerRepository, PgPartnerRepository, PgTourRepository, SqlitePartnerRepository,
    SqliteTourRepository, TourRepository,
};
use tourplanner::services::assistant::TravelAssistant;
use tourplanner::services::catalog::Catalog;
use tourplanner::services::geocoding::{NominatimClient, ReverseGeocoder};
use tourplanner::services::llm::{CompletionClient, OpenAiClient};
use tourplanner::services::tour_generator::TourGenerator;
use tourplanner::AppState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourplanner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting tour planner API server");
    tracing::info!("Configuration loaded successfully");

    let (tour_repo, partner_repo) = connect_store(&config).await?;

    // Initialize cache: try Redis, fall back to in-memory
    let cache: Arc<dyn ItineraryCache> = if let Some(ref redis_url) = config.redis_url {
        tracing::info!("Connecting to Redis cache...");
        match RedisCacheService::new(redis_url, config.itinerary_cache_ttl).await {
            Ok(redis_cache) => {
                tracing::info!("Redis cache connection established");
                Arc::new(redis_cache)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Falling back to in-memory cache.",
                    e
                );
                Arc::new(MemoryCacheService::new(
                    config.itinerary_cache_ttl,
                    DEFAULT_MEMORY_CACHE_MAX_ENTRIES,
                ))
            }
        }
    } else {
        tracing::info!("Redis URL not configured. Using in-memory cache.");
        Arc::new(MemoryCacheService::new(
            config.itinerary_cache_ttl,
            DEFAULT_MEMORY_CACHE_MAX_ENTRIES,
        ))
    };

    // Initialize services
    let timeout = Duration::from_secs(config.http_timeout_secs);
    let completion: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::new(&config.llm, timeout)?);
    let geocoder: Arc<dyn ReverseGeocoder> = Arc::new(NominatimClient::new(
        config.geocoder_base_url.clone(),
        timeout,
    )?);
    tracing::info!(model = completion.model_name(), "Completion client ready");

    let tour_generator = TourGenerator::new(
        completion.clone(),
        Some(cache.clone()),
        config.food_spot_radius,
    );
    let assistant = TravelAssistant::new(config.chat_session_ttl, Some(completion));

    // Create application state
    let state = Arc::new(AppState {
        tour_generator,
        tour_repo,
        partner_repo,
        geocoder,
        assistant,
        catalog: Catalog::jaipur(),
        cache: Some(cache),
        jwt: JwtKeys::new(&config.jwt_secret),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", tourplanner::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

type Store = (Arc<dyn TourRepository>, Arc<dyn PartnerRepository>);

/// Postgres with migrations, or SQLite with a runtime-created schema for local use.
async fn connect_store(config: &Config) -> Result<Store, Box<dyn std::error::Error>> {
    tracing::info!("Connecting to database...");

    if config.uses_sqlite() {
        let pool = tourplanner::db::create_sqlite_pool(&config.database_url).await?;
        tourplanner::db::create_sqlite_schema(&pool).await?;
        tracing::info!("SQLite store ready");
        return Ok((
            Arc::new(SqliteTourRepository::new(pool.clone())),
            Arc::new(SqlitePartnerRepository::new(pool)),
        ));
    }

    let db_pool = tourplanner::db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database migrations completed");

    Ok((
        Arc::new(PgTourRepository::new(db_pool.clone())),
        Arc::new(PgPartnerRepository::new(db_pool)),
    ))
}
