use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Restaurant,
    Cafe,
    StreetFood,
    Bakery,
    Bar,
    Dessert,
    Market,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Restaurant,
        FoodCategory::Cafe,
        FoodCategory::StreetFood,
        FoodCategory::Bakery,
        FoodCategory::Bar,
        FoodCategory::Dessert,
        FoodCategory::Market,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Restaurant => "restaurant",
            FoodCategory::Cafe => "cafe",
            FoodCategory::StreetFood => "street_food",
            FoodCategory::Bakery => "bakery",
            FoodCategory::Bar => "bar",
            FoodCategory::Dessert => "dessert",
            FoodCategory::Market => "market",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        FoodCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| format!("Invalid food category: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Budget,
    Moderate,
    Expensive,
}

impl PriceRange {
    pub const ALL: [PriceRange; 3] = [PriceRange::Budget, PriceRange::Moderate, PriceRange::Expensive];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Budget => "budget",
            PriceRange::Moderate => "moderate",
            PriceRange::Expensive => "expensive",
        }
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        PriceRange::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| format!("Invalid price range: {}", s))
    }
}

/// A place to eat suggested alongside an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodSpot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: Coordinates,
    #[serde(rename = "type")]
    pub category: FoodCategory,
    #[serde(default)]
    pub cuisine_types: Vec<String>,
    pub price_range: PriceRange,
    /// 0.0 - 5.0
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub opening_hours: String,
    /// Distance in km to the nearest route stop, filled in by route filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HotelTier {
    Budget,
    #[serde(rename = "Mid-Range")]
    MidRange,
    Luxury,
}

impl HotelTier {
    pub const ALL: [HotelTier; 3] = [HotelTier::Budget, HotelTier::MidRange, HotelTier::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            HotelTier::Budget => "Budget",
            HotelTier::MidRange => "Mid-Range",
            HotelTier::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for HotelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HotelTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "budget" => Ok(HotelTier::Budget),
            "midrange" => Ok(HotelTier::MidRange),
            "luxury" => Ok(HotelTier::Luxury),
            _ => Err(format!("Invalid hotel type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelOption {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub tier: HotelTier,
    pub price_per_night: f64,
    /// 0.0 - 5.0
    pub rating: f64,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_category_parsing() {
        assert_eq!("street_food".parse::<FoodCategory>().unwrap(), FoodCategory::StreetFood);
        assert_eq!("CAFE".parse::<FoodCategory>().unwrap(), FoodCategory::Cafe);
        assert!("buffet".parse::<FoodCategory>().is_err());
    }

    #[test]
    fn test_hotel_tier_parsing() {
        assert_eq!("Mid-Range".parse::<HotelTier>().unwrap(), HotelTier::MidRange);
        assert_eq!("mid range".parse::<HotelTier>().unwrap(), HotelTier::MidRange);
        assert_eq!("luxury".parse::<HotelTier>().unwrap(), HotelTier::Luxury);
        assert!("hostel".parse::<HotelTier>().is_err());
    }

    #[test]
    fn test_hotel_tier_wire_format() {
        assert_eq!(
            serde_json::to_value(HotelTier::MidRange).unwrap(),
            serde_json::json!("Mid-Range")
        );
    }
}
