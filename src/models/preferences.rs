use crate::constants::{MAX_INTERESTS, MAX_TOUR_DURATION_HOURS};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    #[serde(alias = "walk")]
    Walking,
    #[serde(alias = "car", alias = "drive")]
    Driving,
    #[serde(alias = "public", alias = "public_transport")]
    Transit,
    #[serde(alias = "biking", alias = "bike", alias = "cycling")]
    Bicycling,
}

impl TransportMode {
    /// Travel mode name understood by Google Maps direction links
    pub fn directions_mode(&self) -> &'static str {
        match self {
            TransportMode::Walking => "walking",
            TransportMode::Driving => "driving",
            TransportMode::Transit => "transit",
            TransportMode::Bicycling => "bicycling",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.directions_mode())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walking" | "walk" => Ok(TransportMode::Walking),
            "driving" | "drive" | "car" => Ok(TransportMode::Driving),
            "transit" | "public" | "public_transport" => Ok(TransportMode::Transit),
            "bicycling" | "biking" | "bike" | "cycling" => Ok(TransportMode::Bicycling),
            _ => Err(format!("Invalid transport mode: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Low => write!(f, "low"),
            Budget::Medium => write!(f, "medium"),
            Budget::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    #[default]
    Moderate,
    Intense,
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pace::Relaxed => write!(f, "relaxed"),
            Pace::Moderate => write!(f, "moderate"),
            Pace::Intense => write!(f, "intense"),
        }
    }
}

/// What the user asked for on the planning form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Tour length in hours
    pub duration: f64,
    #[serde(default)]
    pub transport_mode: TransportMode,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub pace: Pace,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl UserPreferences {
    pub fn new(location: impl Into<String>, duration: f64, interests: Vec<String>) -> Self {
        UserPreferences {
            location: location.into(),
            coordinates: None,
            duration,
            transport_mode: TransportMode::default(),
            interests,
            budget: Budget::default(),
            pace: Pace::default(),
            additional_notes: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("location must not be empty".to_string());
        }
        if !self.duration.is_finite()
            || self.duration <= 0.0
            || self.duration > MAX_TOUR_DURATION_HOURS
        {
            return Err(format!(
                "duration must be between 0 and {} hours",
                MAX_TOUR_DURATION_HOURS
            ));
        }
        if self.interests.len() > MAX_INTERESTS {
            return Err(format!("at most {} interests are allowed", MAX_INTERESTS));
        }
        if self.interests.iter().any(|i| i.trim().is_empty()) {
            return Err("interests must not contain empty entries".to_string());
        }
        Ok(())
    }

    /// Tour length in whole minutes
    pub fn duration_minutes(&self) -> u32 {
        (self.duration * 60.0).round() as u32
    }
}
