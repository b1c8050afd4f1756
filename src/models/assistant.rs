use crate::models::HotelOption;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    /// A plan was delivered; waiting for the user to pick a hotel
    CollectingBookingDetails,
    /// A hotel was picked; waiting for yes/no
    Confirming,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    pub activities: Vec<Activity>,
}

/// Multi-day plan produced by the chat assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TourPlan {
    pub destination: String,
    /// Days requested by the user
    pub duration: u32,
    pub preferences: Vec<String>,
    pub itinerary: Vec<DayPlan>,
    pub hotels: Vec<HotelOption>,
}

/// Per-session chat state. Held in memory only.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    pub state: ConversationState,
    pub current_plan: Option<TourPlan>,
    pub pending_hotel: Option<HotelOption>,
    pub booked_hotel: Option<HotelOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub message: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.message.trim().is_empty() {
            return Err("message must not be empty".to_string());
        }
        if self.message.len() > crate::constants::MAX_CHAT_MESSAGE_CHARS {
            return Err(format!(
                "message must be at most {} characters",
                crate::constants::MAX_CHAT_MESSAGE_CHARS
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub reply: String,
    pub state: ConversationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<TourPlan>,
}
