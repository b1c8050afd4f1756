use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    // Sights
    Landmark,
    Monument,
    Historic,
    Palace,
    Fort,
    Religious,
    Viewpoint,

    // Culture
    Museum,
    Gallery,
    Entertainment,

    // Outdoors
    Park,
    Garden,
    Beach,
    Nature,

    // Urban
    Market,
    Shopping,
    Neighborhood,

    // Food & drink
    Restaurant,
    Cafe,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 19] = [
        PlaceCategory::Landmark,
        PlaceCategory::Monument,
        PlaceCategory::Historic,
        PlaceCategory::Palace,
        PlaceCategory::Fort,
        PlaceCategory::Religious,
        PlaceCategory::Viewpoint,
        PlaceCategory::Museum,
        PlaceCategory::Gallery,
        PlaceCategory::Entertainment,
        PlaceCategory::Park,
        PlaceCategory::Garden,
        PlaceCategory::Beach,
        PlaceCategory::Nature,
        PlaceCategory::Market,
        PlaceCategory::Shopping,
        PlaceCategory::Neighborhood,
        PlaceCategory::Restaurant,
        PlaceCategory::Cafe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::Landmark => "landmark",
            PlaceCategory::Monument => "monument",
            PlaceCategory::Historic => "historic",
            PlaceCategory::Palace => "palace",
            PlaceCategory::Fort => "fort",
            PlaceCategory::Religious => "religious",
            PlaceCategory::Viewpoint => "viewpoint",
            PlaceCategory::Museum => "museum",
            PlaceCategory::Gallery => "gallery",
            PlaceCategory::Entertainment => "entertainment",
            PlaceCategory::Park => "park",
            PlaceCategory::Garden => "garden",
            PlaceCategory::Beach => "beach",
            PlaceCategory::Nature => "nature",
            PlaceCategory::Market => "market",
            PlaceCategory::Shopping => "shopping",
            PlaceCategory::Neighborhood => "neighborhood",
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Cafe => "cafe",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        PlaceCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| format!("Invalid place category: {}", s))
    }
}

/// A single stop of an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: Coordinates,
    /// Recommended visit time in minutes
    pub duration: u32,
    #[serde(rename = "type")]
    pub category: PlaceCategory,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub historical_facts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_category_parsing() {
        assert_eq!("museum".parse::<PlaceCategory>().unwrap(), PlaceCategory::Museum);
        assert_eq!(" Landmark ".parse::<PlaceCategory>().unwrap(), PlaceCategory::Landmark);
        assert!("spaceport".parse::<PlaceCategory>().is_err());
    }

    #[test]
    fn test_every_category_round_trips_through_its_name() {
        for category in PlaceCategory::ALL {
            assert_eq!(category.as_str().parse::<PlaceCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_place_wire_format() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "id": "louvre",
            "name": "Louvre",
            "description": "Art museum",
            "location": [48.8606, 2.3376],
            "duration": 120,
            "type": "museum",
            "highlights": ["Mona Lisa"]
        }))
        .unwrap();

        assert_eq!(place.category, PlaceCategory::Museum);
        assert_eq!(place.location.lng, 2.3376);
        assert!(place.historical_facts.is_empty());

        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["type"], "museum");
        assert!(json.get("historicalFacts").is_none());
    }
}
