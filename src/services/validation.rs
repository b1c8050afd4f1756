//! Strict validation of model-generated itinerary JSON.
//!
//! The model's reply is never trusted field by field: the whole document is
//! walked, and the first problem found rejects it. A successful result is a
//! fully typed [`GeneratedItinerary`]; there is no partially populated
//! variant.

use crate::constants::MAX_ITINERARY_MINUTES;
use crate::models::{
    Coordinates, FoodCategory, FoodSpot, HotelOption, HotelTier, Place, PlaceCategory,
    PriceRange,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MalformedResponse,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("response is not valid JSON: {0}")]
    NotJson(String),

    #[error("{path}: expected an object")]
    NotAnObject { path: String },

    #[error("{path}: required field is missing")]
    MissingField { path: String },

    #[error("{path}: expected {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("{path}: invalid coordinate ({reason})")]
    InvalidCoordinate { path: String, reason: String },

    #[error("{path}: '{value}' is not an allowed value")]
    UnknownVariant { path: String, value: String },

    #[error("{path}: {detail}")]
    OutOfRange { path: String, detail: String },

    #[error("expected {expected} transport times for {places} places, got {actual}")]
    TransportTimesMismatch {
        places: usize,
        expected: usize,
        actual: usize,
    },

    #[error("itinerary contains no places")]
    NoPlaces,

    #[error("duplicate place id '{0}'")]
    DuplicatePlaceId(String),
}

impl ValidationError {
    /// Every rejection is reported to callers as one kind of failure.
    pub fn kind(&self) -> ValidationErrorKind {
        ValidationErrorKind::MalformedResponse
    }
}

type Result<T> = std::result::Result<T, ValidationError>;

/// The validated part of a model reply, before route/meal post-processing.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedItinerary {
    pub title: String,
    pub places: Vec<Place>,
    pub transport_times: Vec<u32>,
    pub total_duration: u32,
    pub notes: String,
    pub food_recommendations: Vec<FoodSpot>,
    pub hotels: Vec<HotelOption>,
    pub tips: Vec<String>,
}

/// Parse and validate a raw model reply.
pub fn parse_itinerary(raw: &str) -> Result<GeneratedItinerary> {
    let payload = strip_code_fence(raw);
    let value: Value =
        serde_json::from_str(payload).map_err(|e| ValidationError::NotJson(e.to_string()))?;
    validate_itinerary(&value)
}

/// Validate an already-parsed itinerary document.
pub fn validate_itinerary(value: &Value) -> Result<GeneratedItinerary> {
    let root = as_object(value, "$")?;

    let title = required_string(root, "$", "title")?;
    let total_duration = minutes(required_number(root, "$", "totalDuration")?, "$.totalDuration")?;
    if total_duration == 0 {
        return Err(ValidationError::OutOfRange {
            path: "$.totalDuration".to_string(),
            detail: "must be greater than zero".to_string(),
        });
    }

    let places = required_array(root, "$", "places")?
        .iter()
        .enumerate()
        .map(|(i, v)| place(v, &format!("$.places[{}]", i)))
        .collect::<Result<Vec<_>>>()?;

    if places.is_empty() {
        return Err(ValidationError::NoPlaces);
    }

    let mut seen = HashSet::new();
    for p in &places {
        if !seen.insert(p.id.as_str()) {
            return Err(ValidationError::DuplicatePlaceId(p.id.clone()));
        }
    }

    let transport_times = required_array(root, "$", "transportTimes")?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let path = format!("$.transportTimes[{}]", i);
            minutes(number(v, &path)?, &path)
        })
        .collect::<Result<Vec<_>>>()?;

    if transport_times.len() != places.len() - 1 {
        return Err(ValidationError::TransportTimesMismatch {
            places: places.len(),
            expected: places.len() - 1,
            actual: transport_times.len(),
        });
    }

    let notes = optional_string(root, "$", "notes")?.unwrap_or_default();
    let tips = match optional(root, "tips") {
        Some(v) => string_list(v, "$.tips")?,
        None => Vec::new(),
    };

    let food_recommendations = match optional(root, "foodRecommendations") {
        Some(v) => array(v, "$.foodRecommendations")?
            .iter()
            .enumerate()
            .map(|(i, v)| food_spot(v, &format!("$.foodRecommendations[{}]", i)))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let hotels = match optional(root, "hotels") {
        Some(v) => array(v, "$.hotels")?
            .iter()
            .enumerate()
            .map(|(i, v)| hotel(v, &format!("$.hotels[{}]", i)))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(GeneratedItinerary {
        title,
        places,
        transport_times,
        total_duration,
        notes,
        food_recommendations,
        hotels,
        tips,
    })
}

/// Chat models like to wrap JSON in a Markdown fence; peel off one layer.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn place(value: &Value, path: &str) -> Result<Place> {
    let obj = as_object(value, path)?;

    Ok(Place {
        id: required_string(obj, path, "id")?,
        name: required_string(obj, path, "name")?,
        description: required_string(obj, path, "description")?,
        location: coordinate(required(obj, path, "location")?, &join(path, "location"))?,
        duration: minutes(
            required_number(obj, path, "duration")?,
            &join(path, "duration"),
        )?,
        category: variant::<PlaceCategory>(obj, path, "type")?,
        historical_facts: match optional(obj, "historicalFacts") {
            Some(v) => string_list(v, &join(path, "historicalFacts"))?,
            None => Vec::new(),
        },
        best_time_to_visit: optional_string(obj, path, "bestTimeToVisit")?,
        highlights: match optional(obj, "highlights") {
            Some(v) => string_list(v, &join(path, "highlights"))?,
            None => Vec::new(),
        },
    })
}

fn food_spot(value: &Value, path: &str) -> Result<FoodSpot> {
    let obj = as_object(value, path)?;

    Ok(FoodSpot {
        id: required_string(obj, path, "id")?,
        name: required_string(obj, path, "name")?,
        description: required_string(obj, path, "description")?,
        location: coordinate(required(obj, path, "location")?, &join(path, "location"))?,
        category: variant::<FoodCategory>(obj, path, "type")?,
        cuisine_types: string_list(
            required(obj, path, "cuisineTypes")?,
            &join(path, "cuisineTypes"),
        )?,
        price_range: variant::<PriceRange>(obj, path, "priceRange")?,
        rating: rating(required_number(obj, path, "rating")?, &join(path, "rating"))?,
        reviews: match optional(obj, "reviews") {
            Some(v) => count(number(v, &join(path, "reviews"))?, &join(path, "reviews"))?,
            None => 0,
        },
        opening_hours: optional_string(obj, path, "openingHours")?.unwrap_or_default(),
        distance: None,
        recommendations: match optional(obj, "recommendations") {
            Some(v) => string_list(v, &join(path, "recommendations"))?,
            None => Vec::new(),
        },
    })
}

fn hotel(value: &Value, path: &str) -> Result<HotelOption> {
    let obj = as_object(value, path)?;

    let price_per_night = required_number(obj, path, "pricePerNight")?;
    if price_per_night < 0.0 {
        return Err(ValidationError::OutOfRange {
            path: join(path, "pricePerNight"),
            detail: "must not be negative".to_string(),
        });
    }

    Ok(HotelOption {
        id: count(required_number(obj, path, "id")?, &join(path, "id"))?,
        name: required_string(obj, path, "name")?,
        tier: variant::<HotelTier>(obj, path, "type")?,
        price_per_night,
        rating: rating(required_number(obj, path, "rating")?, &join(path, "rating"))?,
        description: required_string(obj, path, "description")?,
        amenities: match optional(obj, "amenities") {
            Some(v) => string_list(v, &join(path, "amenities"))?,
            None => Vec::new(),
        },
        location: optional_string(obj, path, "location")?.unwrap_or_default(),
    })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn join(path: &str, key: &str) -> String {
    format!("{}.{}", path, key)
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| ValidationError::NotAnObject {
        path: path.to_string(),
    })
}

/// Present and non-null
fn optional<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn required<'a>(obj: &'a Map<String, Value>, path: &str, key: &str) -> Result<&'a Value> {
    optional(obj, key).ok_or_else(|| ValidationError::MissingField {
        path: join(path, key),
    })
}

fn string(value: &Value, path: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::WrongType {
            path: path.to_string(),
            expected: "a string",
        })
}

fn required_string(obj: &Map<String, Value>, path: &str, key: &str) -> Result<String> {
    let s = string(required(obj, path, key)?, &join(path, key))?;
    if s.trim().is_empty() {
        return Err(ValidationError::OutOfRange {
            path: join(path, key),
            detail: "must not be empty".to_string(),
        });
    }
    Ok(s)
}

fn optional_string(obj: &Map<String, Value>, path: &str, key: &str) -> Result<Option<String>> {
    optional(obj, key)
        .map(|v| string(v, &join(path, key)))
        .transpose()
}

fn number(value: &Value, path: &str) -> Result<f64> {
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::WrongType {
            path: path.to_string(),
            expected: "a number",
        })
}

fn required_number(obj: &Map<String, Value>, path: &str, key: &str) -> Result<f64> {
    number(required(obj, path, key)?, &join(path, key))
}

fn array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| ValidationError::WrongType {
        path: path.to_string(),
        expected: "an array",
    })
}

fn required_array<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Vec<Value>> {
    array(required(obj, path, key)?, &join(path, key))
}

fn string_list(value: &Value, path: &str) -> Result<Vec<String>> {
    array(value, path)?
        .iter()
        .enumerate()
        .map(|(i, v)| string(v, &format!("{}[{}]", path, i)))
        .collect()
}

fn coordinate(value: &Value, path: &str) -> Result<Coordinates> {
    let items = array(value, path)?;
    if items.len() != 2 {
        return Err(ValidationError::InvalidCoordinate {
            path: path.to_string(),
            reason: format!("expected 2 elements, got {}", items.len()),
        });
    }
    let lat = number(&items[0], &format!("{}[0]", path))?;
    let lng = number(&items[1], &format!("{}[1]", path))?;
    Coordinates::new(lat, lng).map_err(|reason| ValidationError::InvalidCoordinate {
        path: path.to_string(),
        reason,
    })
}

fn variant<T: FromStr>(obj: &Map<String, Value>, path: &str, key: &str) -> Result<T> {
    let raw = string(required(obj, path, key)?, &join(path, key))?;
    raw.parse::<T>().map_err(|_| ValidationError::UnknownVariant {
        path: join(path, key),
        value: raw,
    })
}

/// Duration in whole minutes, at most one day
fn minutes(n: f64, path: &str) -> Result<u32> {
    if !(0.0..=MAX_ITINERARY_MINUTES as f64).contains(&n) {
        return Err(ValidationError::OutOfRange {
            path: path.to_string(),
            detail: format!(
                "{} is not a number of minutes between 0 and {}",
                n, MAX_ITINERARY_MINUTES
            ),
        });
    }
    Ok(n.round() as u32)
}

fn count(n: f64, path: &str) -> Result<u32> {
    if n < 0.0 || n.fract() != 0.0 || n > u32::MAX as f64 {
        return Err(ValidationError::OutOfRange {
            path: path.to_string(),
            detail: format!("{} is not a non-negative integer", n),
        });
    }
    Ok(n as u32)
}

fn rating(n: f64, path: &str) -> Result<f64> {
    if !(0.0..=5.0).contains(&n) {
        return Err(ValidationError::OutOfRange {
            path: path.to_string(),
            detail: format!("rating {} is outside 0-5", n),
        });
    }
    Ok(n)
}
