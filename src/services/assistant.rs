//! Chat-style travel assistant.
//!
//! Requests of the form "plan a trip to Jaipur for 3 days" are answered from
//! a small table of ready-made plans. After a plan is shown the user can book
//! one of its hotels and confirm the choice. Anything the table cannot
//! answer goes to the completion model, when one is configured.

use crate::constants::{MAX_ASSISTANT_TRIP_DAYS, MAX_CHAT_SESSIONS};
use crate::error::{AppError, Result};
use crate::models::assistant::{Activity, ChatRequest, ChatResponse, DayPlan};
use crate::models::{Conversation, ConversationState, HotelOption, HotelTier, TourPlan};
use crate::services::llm::CompletionClient;
use crate::services::prompt::TourPrompt;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

pub const NOT_UNDERSTOOD_REPLY: &str = "I couldn't understand your travel request. Please specify \
the destination and duration clearly (e.g., 'Plan a trip to Jaipur for 3 days')";

pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

const ASSISTANT_INSTRUCTION: &str = "You are a friendly travel assistant. Answer travel \
questions briefly. If the user asks for a trip plan, ask them to name a destination and a \
number of days.";

const DESTINATION_TRIGGERS: &[&[&str]] = &[
    &["going", "to"],
    &["trip", "to"],
    &["travel", "to"],
    &["visit"],
    &["visiting"],
    &["getaway", "in"],
    &["holiday", "in"],
    &["tour", "of"],
];

const NUMBER_WORDS: [&str; 14] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen",
];

/// What a free-text trip request asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub destination: String,
    pub days: u32,
}

/// Outcome of feeding one message to a conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Reply {
        text: String,
        plan: Option<TourPlan>,
    },
    /// Nothing matched; ask the model, or give up politely.
    Unrecognised,
}

impl Step {
    fn text(text: impl Into<String>) -> Self {
        Step::Reply {
            text: text.into(),
            plan: None,
        }
    }
}

/// Session-holding front of the assistant.
///
/// Each session's conversation sits behind its own lock, so turns on one
/// session run one at a time while different sessions proceed in parallel.
pub struct TravelAssistant {
    sessions: Cache<Uuid, Arc<Mutex<Conversation>>>,
    fallback: Option<Arc<dyn CompletionClient>>,
}

impl TravelAssistant {
    pub fn new(session_ttl_seconds: u64, fallback: Option<Arc<dyn CompletionClient>>) -> Self {
        let sessions = Cache::builder()
            .time_to_idle(Duration::from_secs(session_ttl_seconds))
            .max_capacity(MAX_CHAT_SESSIONS)
            .build();

        TravelAssistant { sessions, fallback }
    }

    #[instrument(skip(self, request), fields(session = ?request.session_id))]
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        request.validate().map_err(AppError::InvalidRequest)?;

        let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
        let session = self
            .sessions
            .get_with(session_id, async { Arc::new(Mutex::new(Conversation::default())) })
            .await;

        // Held across the fallback call
        let mut conversation = session.lock().await;
        let before = conversation.state;

        let (reply, plan) = match advance(&mut conversation, &request.message) {
            Step::Reply { text, plan } => (text, plan),
            Step::Unrecognised => (self.fallback_reply(&request.message).await, None),
        };

        if before != conversation.state {
            tracing::debug!(from = ?before, to = ?conversation.state, "Conversation state changed");
        }

        Ok(ChatResponse {
            session_id,
            reply,
            state: conversation.state,
            plan,
        })
    }

    /// Current conversation for a session, if it has not expired.
    pub async fn conversation(&self, session_id: &Uuid) -> Option<Conversation> {
        let session = self.sessions.get(session_id).await?;
        let conversation = session.lock().await;
        Some(conversation.clone())
    }

    async fn fallback_reply(&self, message: &str) -> String {
        let Some(client) = &self.fallback else {
            return NOT_UNDERSTOOD_REPLY.to_string();
        };

        let prompt = TourPrompt {
            system: ASSISTANT_INSTRUCTION.to_string(),
            user: message.to_string(),
        };
        match client.complete(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Assistant fallback completion failed");
                ERROR_REPLY.to_string()
            }
        }
    }
}

/// Apply one user message to a conversation.
pub fn advance(conversation: &mut Conversation, message: &str) -> Step {
    let tokens = tokenize(message);

    match conversation.state {
        ConversationState::Confirming => confirm_booking(conversation, &tokens),
        ConversationState::CollectingBookingDetails if tokens.iter().any(|t| t == "book") => {
            select_hotel(conversation, message)
        }
        ConversationState::CollectingBookingDetails | ConversationState::Idle => {
            match parse_trip_request(message).and_then(|req| canned_plan(&req)) {
                Some(plan) => {
                    let text = format_plan(&plan);
                    conversation.current_plan = Some(plan.clone());
                    conversation.pending_hotel = None;
                    conversation.state = ConversationState::CollectingBookingDetails;
                    Step::Reply {
                        text,
                        plan: Some(plan),
                    }
                }
                None => Step::Unrecognised,
            }
        }
    }
}

fn select_hotel(conversation: &mut Conversation, message: &str) -> Step {
    let hotels = conversation
        .current_plan
        .as_ref()
        .map(|p| p.hotels.as_slice())
        .unwrap_or_default();

    match match_hotel(hotels, message) {
        Some(hotel) => {
            let text = format!(
                "You picked {} ({}, ₹{}/night). Shall I confirm this booking? (yes/no)",
                hotel.name, hotel.tier, hotel.price_per_night
            );
            conversation.pending_hotel = Some(hotel);
            conversation.state = ConversationState::Confirming;
            Step::text(text)
        }
        None => Step::text(format!(
            "I couldn't find that hotel in your plan. Available options: {}.",
            hotel_names(hotels)
        )),
    }
}

fn confirm_booking(conversation: &mut Conversation, tokens: &[String]) -> Step {
    let has = |words: &[&str]| tokens.iter().any(|t| words.contains(&t.as_str()));

    if has(&["yes", "confirm", "yeah", "sure"]) {
        let hotel = conversation.pending_hotel.take();
        conversation.state = ConversationState::Idle;
        let text = match &hotel {
            Some(h) => format!(
                "Great! I've noted your stay at {}. You can modify your choice anytime. \
                 Would you like me to help you with anything else?",
                h.name
            ),
            None => "Great! Would you like me to help you with anything else?".to_string(),
        };
        conversation.booked_hotel = hotel;
        return Step::text(text);
    }

    if has(&["no", "cancel", "nope"]) {
        conversation.pending_hotel = None;
        conversation.state = ConversationState::CollectingBookingDetails;
        let hotels = conversation
            .current_plan
            .as_ref()
            .map(|p| p.hotels.as_slice())
            .unwrap_or_default();
        return Step::text(format!(
            "No problem. Which hotel would you like instead? Options: {}.",
            hotel_names(hotels)
        ));
    }

    let pending = conversation
        .pending_hotel
        .as_ref()
        .map(|h| h.name.as_str())
        .unwrap_or("your hotel");
    Step::text(format!(
        "Please reply yes to confirm {} or no to choose another option.",
        pending
    ))
}

fn hotel_names(hotels: &[HotelOption]) -> String {
    hotels
        .iter()
        .map(|h| format!("{} ({})", h.name, h.tier))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Find the hotel a booking message refers to, by name first, then by tier.
pub fn match_hotel(hotels: &[HotelOption], message: &str) -> Option<HotelOption> {
    let lower = message.to_lowercase();

    let by_name = hotels.iter().find(|h| {
        let name = h.name.to_lowercase();
        let short = name
            .trim_start_matches("hotel ")
            .trim_start_matches("the ")
            .to_string();
        lower.contains(&name) || lower.contains(&short)
    });
    if let Some(hotel) = by_name {
        return Some(hotel.clone());
    }

    let squashed: String = lower.chars().filter(|c| c.is_alphanumeric()).collect();
    let tier = if squashed.contains("midrange") {
        HotelTier::MidRange
    } else if squashed.contains("luxury") {
        HotelTier::Luxury
    } else if squashed.contains("budget") || squashed.contains("cheap") {
        HotelTier::Budget
    } else {
        return None;
    };

    hotels.iter().find(|h| h.tier == tier).cloned()
}

// ---------------------------------------------------------------------------
// Trip-request grammar
// ---------------------------------------------------------------------------

/// Lowercased words with surrounding punctuation removed.
fn tokenize(message: &str) -> Vec<String> {
    message
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Both a destination and a day count, or nothing.
pub fn parse_trip_request(message: &str) -> Option<TripRequest> {
    let tokens = tokenize(message);
    Some(TripRequest {
        destination: extract_destination(&tokens)?,
        days: extract_days(&tokens)?,
    })
}

/// The word after the leftmost trigger phrase, if it is purely alphabetic.
fn extract_destination(tokens: &[String]) -> Option<String> {
    (0..tokens.len()).find_map(|i| {
        DESTINATION_TRIGGERS.iter().find_map(|trigger| {
            let rest = &tokens[i..];
            if rest.len() <= trigger.len()
                || !rest.iter().zip(trigger.iter()).all(|(t, w)| t == w)
            {
                return None;
            }
            let mut candidate = &rest[trigger.len()];
            if candidate == "the" {
                candidate = rest.get(trigger.len() + 1)?;
            }
            candidate
                .chars()
                .all(|c| c.is_alphabetic())
                .then(|| capitalise(candidate))
        })
    })
}

/// A number immediately followed by "day"/"days", also written "3days" or
/// "3-day".
fn extract_days(tokens: &[String]) -> Option<u32> {
    let from_pair = tokens.windows(2).find_map(|pair| {
        matches!(pair[1].as_str(), "day" | "days")
            .then(|| parse_count(&pair[0]))
            .flatten()
    });

    let days = from_pair.or_else(|| {
        tokens.iter().find_map(|t| {
            let number = t
                .strip_suffix("days")
                .or_else(|| t.strip_suffix("day"))?
                .trim_end_matches('-');
            parse_count(number)
        })
    })?;

    (1..=MAX_ASSISTANT_TRIP_DAYS).contains(&days).then_some(days)
}

fn parse_count(word: &str) -> Option<u32> {
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        return word.parse().ok();
    }
    NUMBER_WORDS
        .iter()
        .position(|w| *w == word)
        .map(|i| i as u32 + 1)
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Ready-made plans
// ---------------------------------------------------------------------------

fn activity(name: &str, duration: &str, description: &str) -> Activity {
    Activity {
        name: name.to_string(),
        duration: duration.to_string(),
        description: Some(description.to_string()),
    }
}

fn hotel(id: u32, name: &str, tier: HotelTier, price: f64, rating: f64, description: &str) -> HotelOption {
    HotelOption {
        id,
        name: name.to_string(),
        tier,
        price_per_night: price,
        rating,
        description: description.to_string(),
        amenities: vec![],
        location: "Jaipur".to_string(),
    }
}

fn jaipur_days() -> Vec<DayPlan> {
    vec![
        DayPlan {
            day: 1,
            activities: vec![
                activity("Hawa Mahal", "1 hour", "Visit the iconic Palace of Winds"),
                activity("City Palace", "2 hours", "Explore the royal residence"),
                activity("Lunch at Rawat Misthan Bhandar", "1 hour", "Famous for Pyaz Kachori"),
                activity("Amber Fort", "3 hours", "Sunset view recommended"),
                activity("Dinner at 1135 AD", "2 hours", "Royal dining experience"),
            ],
        },
        DayPlan {
            day: 2,
            activities: vec![
                activity("Jaigarh Fort & Nahargarh Fort", "3 hours", "Panoramic city views"),
                activity("Johari Bazaar", "2 hours", "Local market exploration"),
                activity("Chokhi Dhani", "3 hours", "Cultural experience"),
            ],
        },
        DayPlan {
            day: 3,
            activities: vec![
                activity("Albert Hall Museum", "1.5 hours", "Historical artifacts"),
                activity("Breakfast at Tapri Central", "1 hour", "Popular local cafe"),
                activity("Jal Mahal", "1 hour", "Scenic water palace"),
            ],
        },
    ]
}

fn jaipur_hotels() -> Vec<HotelOption> {
    vec![
        hotel(
            1,
            "Hotel Rosewood",
            HotelTier::Budget,
            1500.0,
            4.2,
            "Comfortable stay with basic amenities in the heart of the city",
        ),
        hotel(
            2,
            "Hotel BlueMoon",
            HotelTier::MidRange,
            3500.0,
            4.5,
            "Modern amenities with rooftop restaurant and pool",
        ),
        hotel(
            3,
            "The Royal Haveli",
            HotelTier::Luxury,
            8000.0,
            4.8,
            "Heritage property with royal decor and premium services",
        ),
    ]
}

/// Ready-made plan for a known destination, cut to the requested length.
pub fn canned_plan(request: &TripRequest) -> Option<TourPlan> {
    let (days, hotels) = match request.destination.to_lowercase().as_str() {
        "jaipur" => (jaipur_days(), jaipur_hotels()),
        _ => return None,
    };

    Some(TourPlan {
        destination: request.destination.clone(),
        duration: request.days,
        preferences: vec!["cultural".to_string(), "sightseeing".to_string()],
        itinerary: days.into_iter().take(request.days as usize).collect(),
        hotels,
    })
}

fn tier_icon(tier: HotelTier) -> &'static str {
    match tier {
        HotelTier::Budget => "💰",
        HotelTier::MidRange => "💎",
        HotelTier::Luxury => "👑",
    }
}

pub fn format_plan(plan: &TourPlan) -> String {
    let mut out = format!(
        "Here's your {}-day travel plan for {}:\n\n",
        plan.duration, plan.destination
    );

    for day in &plan.itinerary {
        out.push_str(&format!("📅 Day {}:\n", day.day));
        for activity in &day.activities {
            out.push_str(&format!("• {} - {}\n", activity.name, activity.duration));
            if let Some(description) = &activity.description {
                out.push_str(&format!("  {}\n", description));
            }
        }
        out.push('\n');
    }

    out.push_str("🏨 Hotel Options:\n");
    for hotel in &plan.hotels {
        out.push_str(&format!(
            "{} {}\n   ₹{}/night | ⭐ {}\n   {}\n\n",
            tier_icon(hotel.tier),
            hotel.name,
            hotel.price_per_night,
            hotel.rating,
            hotel.description
        ));
    }

    out.push_str(
        "Select a hotel by replying with its name or type \
         (e.g., \"Book Hotel BlueMoon\" or \"Book the mid-range option\")",
    );
    out
}
