use crate::models::{FoodCategory, HotelTier, PlaceCategory, PriceRange, UserPreferences};

pub const SYSTEM_INSTRUCTION: &str = "You are an expert travel guide with deep knowledge of \
locations worldwide. Generate detailed, accurate tour itineraries based on user preferences. \
Respond with a single JSON object and nothing else. Always return transport times as plain \
numbers of minutes.";

/// The two chat messages sent for a tour request.
#[derive(Debug, Clone, PartialEq)]
pub struct TourPrompt {
    pub system: String,
    pub user: String,
}

/// Build the chat prompt for a set of preferences. Never fails; the
/// preferences are assumed to have been validated already.
pub fn build_tour_prompt(prefs: &UserPreferences) -> TourPrompt {
    let interests = if prefs.interests.is_empty() {
        "general sightseeing".to_string()
    } else {
        prefs.interests.join(", ")
    };

    let mut user = format!(
        "Generate a detailed tour itinerary for {location} with the following preferences:\n\
         - Duration: {duration} hours ({minutes} minutes)\n\
         - Transport Mode: {mode}\n\
         - Interests: {interests}\n\
         - Budget: {budget}\n\
         - Pace: {pace}\n",
        location = prefs.location,
        duration = prefs.duration,
        minutes = prefs.duration_minutes(),
        mode = prefs.transport_mode,
        interests = interests,
        budget = prefs.budget,
        pace = prefs.pace,
    );

    if let Some(coords) = prefs.coordinates {
        user.push_str(&format!(
            "- Starting point: [{:.5}, {:.5}]\n",
            coords.lat, coords.lng
        ));
    }

    if let Some(notes) = prefs
        .additional_notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        user.push_str(&format!("- Additional notes: {}\n", notes));
    }

    user.push('\n');
    user.push_str(&response_schema());
    user.push_str(
        "\nFocus on creating a realistic, time-appropriate itinerary that matches the interests. \
         The sum of visit durations and transport times should not exceed the requested duration.",
    );

    TourPrompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        user,
    }
}

fn allowed<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn response_schema() -> String {
    format!(
        "Format the response as a JSON object with:\n\
         - title: string, a catchy title for the tour\n\
         - places: array of locations to visit, in visiting order, each with:\n\
         \x20 - id: unique string identifier\n\
         \x20 - name: string\n\
         \x20 - description: string\n\
         \x20 - location: [latitude, longitude] as two numbers\n\
         \x20 - duration: recommended visit time in minutes (number)\n\
         \x20 - type: one of {place_types}\n\
         \x20 - historicalFacts: optional array of strings\n\
         \x20 - bestTimeToVisit: optional string\n\
         \x20 - highlights: optional array of strings\n\
         - transportTimes: array of numbers, travel minutes between consecutive places \
         (exactly one fewer than places)\n\
         - totalDuration: total tour duration in minutes (number)\n\
         - notes: optional string\n\
         - tips: optional array of strings\n\
         - foodRecommendations: optional array, each with id (string), name, description, \
         location [latitude, longitude], type (one of {food_types}), cuisineTypes (array of \
         strings), priceRange (one of {price_ranges}), rating (0-5), reviews (number), \
         openingHours (string), recommendations (array of strings)\n\
         - hotels: optional array, each with id (number), name, type (one of {hotel_tiers}), \
         pricePerNight (number), rating (0-5), description, amenities (array of strings), \
         location (string)\n",
        place_types = allowed(PlaceCategory::ALL),
        food_types = allowed(FoodCategory::ALL),
        price_ranges = allowed(PriceRange::ALL.iter().map(|p| p.as_str())),
        hotel_tiers = allowed(HotelTier::ALL),
    )
}
