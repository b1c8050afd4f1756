use crate::models::Itinerary;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted summary of a tour the user chose to keep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedTour {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub destinations: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Title and stop names to keep.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedTour {
    #[serde(default)]
    pub title: Option<String>,
    pub destinations: Vec<String>,
}

/// Body of a save request: an explicit summary, or a generated itinerary
/// whose title and place names become the summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SaveTourRequest {
    Summary(NewSavedTour),
    Itinerary(Box<Itinerary>),
}

impl SaveTourRequest {
    pub fn into_summary(self) -> NewSavedTour {
        match self {
            SaveTourRequest::Summary(summary) => summary,
            SaveTourRequest::Itinerary(itinerary) => NewSavedTour::from(*itinerary),
        }
    }
}

impl From<Itinerary> for NewSavedTour {
    fn from(itinerary: Itinerary) -> Self {
        NewSavedTour {
            destinations: itinerary.destination_names(),
            title: Some(itinerary.title),
        }
    }
}

impl NewSavedTour {
    pub fn validate(&self) -> Result<(), String> {
        if self.destinations.is_empty() {
            return Err("destinations must not be empty".to_string());
        }
        if self.destinations.iter().any(|d| d.trim().is_empty()) {
            return Err("destinations must not contain empty names".to_string());
        }
        Ok(())
    }

    /// Title to store; blank titles fall back to a generic one.
    pub fn resolved_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => crate::constants::DEFAULT_TOUR_TITLE.to_string(),
        }
    }

    pub fn into_saved(self, user_id: &str) -> SavedTour {
        SavedTour {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: self.resolved_title(),
            destinations: self.destinations,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
