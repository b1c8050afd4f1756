use crate::models::{Coordinates, FoodSpot, HotelOption, Place, TransportMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealKind {
    Lunch,
    Dinner,
}

/// A suggested meal break after visiting a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    pub meal: MealKind,
    pub place_id: String,
    pub place_index: usize,
    /// Minutes since midnight at which the break starts
    pub starts_at_minute: u32,
}

impl MealSlot {
    /// "HH:MM" clock representation of the start time
    pub fn clock_time(&self) -> String {
        format!(
            "{:02}:{:02}",
            (self.starts_at_minute / 60) % 24,
            self.starts_at_minute % 60
        )
    }
}

/// A generated tour: validated model output plus derived data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub title: String,
    pub places: Vec<Place>,
    /// Travel minutes between consecutive places; one shorter than `places`
    pub transport_times: Vec<u32>,
    /// Total tour length in minutes
    pub total_duration: u32,
    pub transport_mode: TransportMode,
    #[serde(default)]
    pub notes: String,
    /// Ordered stop coordinates, derived from `places`
    pub route: Vec<Coordinates>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub food_recommendations: Vec<FoodSpot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hotels: Vec<HotelOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meal_slots: Vec<MealSlot>,
}

impl Itinerary {
    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn destination_names(&self) -> Vec<String> {
        self.places.iter().map(|p| p.name.clone()).collect()
    }

    pub fn meal_slot(&self, meal: MealKind) -> Option<&MealSlot> {
        self.meal_slots.iter().find(|s| s.meal == meal)
    }
}
