use crate::cache::{itinerary_cache_key, ItineraryCache};
use crate::error::{AppError, Result};
use crate::models::{DistanceKm, Itinerary, TransportMode, UserPreferences};
use crate::services::geometry::{derive_route, filter_food_spots_near_route};
use crate::services::llm::CompletionClient;
use crate::services::meal_slots::estimate_meal_slots;
use crate::services::prompt::build_tour_prompt;
use crate::services::validation::{parse_itinerary, GeneratedItinerary};
use std::sync::Arc;
use tracing::instrument;

/// Turns preferences into a validated, post-processed itinerary.
pub struct TourGenerator {
    completion: Arc<dyn CompletionClient>,
    cache: Option<Arc<dyn ItineraryCache>>,
    food_spot_radius: DistanceKm,
}

impl TourGenerator {
    pub fn new(
        completion: Arc<dyn CompletionClient>,
        cache: Option<Arc<dyn ItineraryCache>>,
        food_spot_radius: DistanceKm,
    ) -> Self {
        TourGenerator {
            completion,
            cache,
            food_spot_radius,
        }
    }

    /// One completion call per cache miss; nothing is retried.
    #[instrument(skip(self, prefs), fields(location = %prefs.location, duration = prefs.duration))]
    pub async fn generate(&self, prefs: &UserPreferences) -> Result<Itinerary> {
        prefs.validate().map_err(AppError::InvalidRequest)?;

        let cache_key = itinerary_cache_key(prefs);
        if let Some(cache) = &self.cache {
            if let Some(itinerary) = cache.get_itinerary(&cache_key).await {
                tracing::info!("Serving cached itinerary for {}", prefs.location);
                return Ok(itinerary);
            }
        }

        let prompt = build_tour_prompt(prefs);
        tracing::debug!(
            model = self.completion.model_name(),
            "Requesting itinerary completion"
        );
        let raw = self.completion.complete(&prompt).await?;

        let generated = parse_itinerary(&raw).map_err(|e| {
            tracing::warn!(error = %e, "Completion failed validation");
            AppError::MalformedResponse(e)
        })?;

        let itinerary = assemble_itinerary(generated, prefs.transport_mode, self.food_spot_radius);

        tracing::info!(
            places = itinerary.places.len(),
            food_spots = itinerary.food_recommendations.len(),
            meal_slots = itinerary.meal_slots.len(),
            "Generated itinerary '{}'",
            itinerary.title
        );

        if let Some(cache) = &self.cache {
            cache.cache_itinerary(&cache_key, &itinerary).await;
        }

        Ok(itinerary)
    }
}

/// Derive the route, keep food spots near it and place meal breaks.
pub fn assemble_itinerary(
    generated: GeneratedItinerary,
    transport_mode: TransportMode,
    food_spot_radius: DistanceKm,
) -> Itinerary {
    let route = derive_route(&generated.places);
    let offered = generated.food_recommendations.len();
    let food_recommendations =
        filter_food_spots_near_route(generated.food_recommendations, &route, food_spot_radius);

    if food_recommendations.len() < offered {
        tracing::debug!(
            offered,
            kept = food_recommendations.len(),
            radius = %food_spot_radius,
            "Dropped food spots away from the route"
        );
    }

    let meal_slots = estimate_meal_slots(
        &generated.places,
        &generated.transport_times,
        generated.total_duration,
    );

    Itinerary {
        title: generated.title,
        places: generated.places,
        transport_times: generated.transport_times,
        total_duration: generated.total_duration,
        transport_mode,
        notes: generated.notes,
        route,
        food_recommendations,
        hotels: generated.hotels,
        tips: generated.tips,
        meal_slots,
    }
}
